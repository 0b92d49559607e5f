//! End-to-end assembly through the library API

mod common;

use common::TestProject;
use mule_bundler::bundler::{
    Application, Bundler, Error, SettingsBuilder, assemble, manifest,
};
use std::fs;

const EXPECTED: [&str; 5] = [
    "test-app1.config1.xml",
    "test-app1.config2.xml",
    "test-app1.globals.xml",
    "test-app2.config-a.xml",
    "test-app2.globals.xml",
];

fn test_apps(project: &TestProject) -> Vec<Application> {
    vec![
        Application::new("test-app1", project.app("test-app1")),
        Application::new("test-app2", project.app("test-app2")),
    ]
}

fn bundler(project: &TestProject) -> Bundler {
    let settings = SettingsBuilder::new()
        .output_dir(project.output_dir())
        .applications(test_apps(project))
        .build()
        .unwrap();
    Bundler::new(settings)
}

#[test]
fn test_two_applications_merge_into_one_bundle() {
    let project = TestProject::with_test_apps();

    let output = bundler(&project).bundle().unwrap();

    let names: Vec<_> = output
        .entries
        .iter()
        .map(|e| e.output_filename.as_str())
        .collect();
    assert_eq!(names, EXPECTED);

    assert_eq!(project.read_output("test-app1.config1.xml"), "<config1/>");
    assert_eq!(project.read_output("test-app1.config2.xml"), "<config2/>");
    assert_eq!(project.read_output("test-app1.globals.xml"), "<globals/>");
    assert_eq!(project.read_output("test-app2.config-a.xml"), "<config-a/>");
    assert_eq!(project.read_output("test-app2.globals.xml"), "<globals/>");

    let manifest = project.read_output("mule-deploy.properties");
    assert!(manifest.contains(
        "config.resources=test-app1.config1.xml,test-app1.config2.xml,test-app1.globals.xml,test-app2.config-a.xml,test-app2.globals.xml"
    ));
}

#[test]
fn test_manifest_and_filesystem_agree() {
    let project = TestProject::with_test_apps();
    project.write_file("apps/test-app2/nested/deeper/flows.xml", "<flows/>");

    bundler(&project).bundle().unwrap();

    let manifest =
        manifest::verify_bundle(&project.output_dir(), "mule-deploy.properties").unwrap();
    let mut listed: Vec<String> = manifest
        .config_resources()
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();
    listed.push("mule-deploy.properties".to_string());
    listed.sort();

    assert_eq!(listed, project.output_files());
    assert!(listed.contains(&"test-app2.flows.xml".to_string()));
}

#[test]
fn test_rerun_is_byte_identical() {
    let project = TestProject::with_test_apps();
    let bundler = bundler(&project);

    bundler.bundle().unwrap();
    let snapshot: Vec<(String, Vec<u8>)> = project
        .output_files()
        .into_iter()
        .map(|name| {
            let bytes = fs::read(project.output_dir().join(&name)).unwrap();
            (name, bytes)
        })
        .collect();

    let second = bundler.bundle().unwrap();
    assert_eq!(second.entries.len(), EXPECTED.len());
    for (name, bytes) in snapshot {
        assert_eq!(fs::read(project.output_dir().join(&name)).unwrap(), bytes);
    }
    assert_eq!(project.output_files().len(), EXPECTED.len() + 1);
}

#[test]
fn test_same_base_name_in_two_applications() {
    let project = TestProject::with_test_apps();

    let entries = assemble(&test_apps(&project), &project.output_dir()).unwrap();

    let globals: Vec<_> = entries
        .iter()
        .filter(|e| e.relative_path == "globals.xml")
        .map(|e| e.output_filename.as_str())
        .collect();
    assert_eq!(globals, ["test-app1.globals.xml", "test-app2.globals.xml"]);
    assert!(project.output_dir().join("test-app1.globals.xml").is_file());
    assert!(project.output_dir().join("test-app2.globals.xml").is_file());
}

#[test]
fn test_missing_root_copies_nothing() {
    let project = TestProject::with_test_apps();
    let apps = vec![
        Application::new("test-app1", project.app("test-app1")),
        Application::new("test-app3", project.app("test-app3")),
    ];

    let err = assemble(&apps, &project.output_dir()).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(err.application(), Some("test-app3"));
    assert!(project.output_files().is_empty());
}

#[test]
fn test_template_keys_pass_through() {
    let project = TestProject::with_test_apps();
    project.write_file(
        "src/main/app/mule-deploy.properties",
        "# deployment descriptor\nredeployment.enabled=true\nconfig.resources=stale.xml\nencoding=UTF-8\n",
    );

    let settings = SettingsBuilder::new()
        .output_dir(project.output_dir())
        .applications(test_apps(&project))
        .manifest_template(project.path.join("src/main/app/mule-deploy.properties"))
        .build()
        .unwrap();
    Bundler::new(settings).bundle().unwrap();

    let manifest = manifest::read_manifest(
        &project.output_dir().join("mule-deploy.properties"),
    )
    .unwrap();
    assert_eq!(manifest.get("redeployment.enabled"), Some("true"));
    assert_eq!(manifest.get("encoding"), Some("UTF-8"));
    assert_eq!(manifest.config_resources().unwrap(), EXPECTED);

    let text = project.read_output("mule-deploy.properties");
    assert!(text.starts_with("# deployment descriptor\n"));
    assert!(!text.contains("stale.xml"));
}

#[test]
fn test_archive_contains_bundle() {
    let project = TestProject::with_test_apps();
    let archive_path = project.path.join("target/mule-bundle.zip");

    let settings = SettingsBuilder::new()
        .output_dir(project.output_dir())
        .applications(test_apps(&project))
        .archive(&archive_path)
        .build()
        .unwrap();
    let output = Bundler::new(settings).bundle().unwrap();

    let artifact = output.artifact.unwrap();
    assert_eq!(artifact.path, archive_path);
    assert_eq!(artifact.checksum.len(), 64);
    assert_eq!(artifact.size, fs::metadata(&archive_path).unwrap().len());

    let mut zip = zip::ZipArchive::new(fs::File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(String::from).collect();
    names.sort();
    let mut expected: Vec<String> = EXPECTED.iter().map(|s| s.to_string()).collect();
    expected.push("mule-deploy.properties".to_string());
    expected.sort();
    assert_eq!(names, expected);

    let mut contents = String::new();
    std::io::Read::read_to_string(
        &mut zip.by_name("test-app2.config-a.xml").unwrap(),
        &mut contents,
    )
    .unwrap();
    assert_eq!(contents, "<config-a/>");
}
