use locedit::{
    LocalizationGroup, Provider, ProviderConfig,
    types::{find_group, find_group_mut},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

struct TestFile {
    fixture: &'static str,
    folder: &'static str,
    name: &'static str,
}

const EN: TestFile = TestFile {
    fixture: "LocalizableStrings-en.strings",
    folder: "Base.lproj",
    name: "LocalizableStrings.strings",
};
const SK: TestFile = TestFile {
    fixture: "LocalizableStrings-sk.strings",
    folder: "sk.lproj",
    name: "LocalizableStrings.strings",
};
const SK_MISSING: TestFile = TestFile {
    fixture: "LocalizableStrings-sk-missing.strings",
    folder: "sk.lproj",
    name: "LocalizableStrings.strings",
};
const INFO_EN: TestFile = TestFile {
    fixture: "InfoPlist-en.strings",
    folder: "Base.lproj",
    name: "InfoPlist.strings",
};
const INFO_SK: TestFile = TestFile {
    fixture: "InfoPlist-sk.strings",
    folder: "sk.lproj",
    name: "InfoPlist.strings",
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Copies fixtures into `<tmp>/Project/<folder>/<name>`.
fn testing_directory(files: &[&TestFile]) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for file in files {
        let folder = dir.path().join("Project").join(file.folder);
        fs::create_dir_all(&folder).expect("create folder");
        fs::copy(fixture(file.fixture), folder.join(file.name)).expect("copy fixture");
    }
    dir
}

fn keys(group: &LocalizationGroup, index: usize) -> Vec<String> {
    group.localizations()[index]
        .entries()
        .iter()
        .map(|e| e.key().to_string())
        .collect()
}

#[test]
fn test_single_language_parsing() {
    let dir = testing_directory(&[&EN]);
    let groups = Provider::default().discover(dir.path());

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name(), "LocalizableStrings.strings");
    assert_eq!(
        groups[0].path(),
        dir.path().join("Project").join("LocalizableStrings.strings")
    );
    assert_eq!(groups[0].localizations().len(), 1);

    let base = &groups[0].localizations()[0];
    assert_eq!(base.language(), "Base");
    assert_eq!(base.len(), 6);
    assert_eq!(
        keys(&groups[0], 0),
        vec!["about", "back", "cancel", "done", "settings", "welcome"]
    );
    assert_eq!(
        base.entry("welcome").and_then(|e| e.message()),
        Some("Shown on the main screen, %@ is the user name")
    );
    assert_eq!(base.entry("cancel").and_then(|e| e.message()), None);
}

#[test]
fn test_multiple_languages_parsing() {
    let dir = testing_directory(&[&EN, &SK]);
    let groups = Provider::default().discover(dir.path());

    assert_eq!(groups.len(), 1);
    let languages: Vec<_> = groups[0].languages().collect();
    assert_eq!(languages, vec!["Base", "sk"]);
    assert_eq!(groups[0].localizations()[0].len(), 6);
    assert_eq!(groups[0].localizations()[1].len(), 6);
    assert_eq!(
        groups[0].localization("sk").unwrap().entry("back").unwrap().value(),
        "Späť"
    );
}

#[test]
fn test_multiple_languages_with_missing_translations() {
    let dir = testing_directory(&[&EN, &SK_MISSING]);
    let groups = Provider::default().discover(dir.path());

    assert_eq!(groups[0].localizations()[0].len(), 6);
    assert_eq!(groups[0].localizations()[1].len(), 4);
    assert!(!groups[0].localization("sk").unwrap().contains_key("about"));
}

#[test]
fn test_multiple_groups_and_languages_parsing() {
    let dir = testing_directory(&[&EN, &SK, &INFO_EN, &INFO_SK]);
    let groups = Provider::default().discover(dir.path());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name(), "InfoPlist.strings");
    assert_eq!(groups[1].name(), "LocalizableStrings.strings");
    for group in &groups {
        let languages: Vec<_> = group.languages().collect();
        assert_eq!(languages, vec!["Base", "sk"]);
    }
    assert_eq!(groups[0].localizations()[0].len(), 2);
    assert_eq!(groups[0].localizations()[1].len(), 2);
    assert_eq!(groups[1].localizations()[0].len(), 6);
    assert_eq!(groups[1].localizations()[1].len(), 6);
}

#[test]
fn test_quotes_parsing() {
    let dir = testing_directory(&[&TestFile {
        fixture: "Special.strings",
        folder: "Base.lproj",
        name: "LocalizableStrings.strings",
    }]);
    let groups = Provider::default().discover(dir.path());
    let base = &groups[0].localizations()[0];

    assert_eq!(base.entry("quoted").unwrap().value(), "some \"quoted\" message");
    assert_eq!(base.entry("newline").unwrap().value(), "first\nsecond");
    assert_eq!(base.entry("percent").unwrap().value(), "%1$@ of %2$@");
}

#[test]
fn test_property_list_files_are_read_without_messages() {
    let dir = testing_directory(&[
        &TestFile {
            fixture: "Plain.strings",
            folder: "en.lproj",
            name: "Words.strings",
        },
        &TestFile {
            fixture: "Plist.strings",
            folder: "de.lproj",
            name: "Words.strings",
        },
    ]);
    let groups = Provider::default().discover(dir.path());
    let group = &groups[0];

    let de = group.localization("de").unwrap();
    assert_eq!(de.entry("title").unwrap().value(), "Title and more");
    assert_eq!(de.entry("back").unwrap().value(), "Back");

    let en = group.localization("en").unwrap();
    assert_eq!(en.entry("farewell").unwrap().value(), "Good bye");
    assert!(en.entries().iter().all(|e| e.message().is_none()));
}

#[test]
fn test_updating_value_in_second_language() {
    let dir = testing_directory(&[&EN, &SK]);
    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());
    let before = groups.clone();

    let group = find_group_mut(&mut groups, "LocalizableStrings.strings").unwrap();
    let sk = group.localization_mut("sk").unwrap();
    provider.update(sk, "cancel", "Zrušiť akciu", None);

    let updated = provider.discover(dir.path());
    assert_eq!(updated.len(), before.len());
    assert_eq!(keys(&updated[0], 0), keys(&before[0], 0));
    assert_eq!(keys(&updated[0], 1), keys(&before[0], 1));
    assert_eq!(
        updated[0].localization("sk").unwrap().entry("cancel").unwrap().value(),
        "Zrušiť akciu"
    );
    // Messages survive the rewrite.
    assert_eq!(
        updated[0]
            .localization("sk")
            .unwrap()
            .entry("back")
            .unwrap()
            .message(),
        Some("Back button")
    );
    assert_eq!(updated[0].localizations()[0], before[0].localizations()[0]);
}

#[test]
fn test_updating_missing_value_inserts_it() {
    let dir = testing_directory(&[&EN, &SK_MISSING]);
    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());

    let sk = groups[0].localization_mut("sk").unwrap();
    provider.update(sk, "about", "O aplikácii", None);

    let updated = provider.discover(dir.path());
    let sk = updated[0].localization("sk").unwrap();
    assert_eq!(sk.len(), 5);
    assert_eq!(sk.entries()[0].key(), "about");
    assert_eq!(sk.entry("about").unwrap().value(), "O aplikácii");
}

#[test]
fn test_update_with_identical_value_leaves_file_untouched() {
    let dir = testing_directory(&[&EN]);
    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());
    let base = groups[0].localization_mut("Base").unwrap();
    let original = fs::read_to_string(base.path()).unwrap();

    provider.update(base, "back", "Back", Some("Back button".to_string()));
    assert_eq!(fs::read_to_string(base.path()).unwrap(), original);
}

#[test]
fn test_adding_value_in_single_language() {
    let dir = testing_directory(&[&EN, &SK]);
    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());

    let base = groups[0].localization_mut("Base").unwrap();
    let added = provider.add(base, "test", Some("test key".to_string()));
    assert_eq!(added.key(), "test");
    assert!(added.is_missing());
    assert_eq!(groups[0].localizations()[0].len(), 7);

    let updated = provider.discover(dir.path());
    let base = updated[0].localization("Base").unwrap();
    assert_eq!(base.len(), 7);
    assert_eq!(base.entry("test").unwrap().value(), "");
    assert_eq!(base.entry("test").unwrap().message(), Some("test key"));
    assert!(!updated[0].localization("sk").unwrap().contains_key("test"));
}

#[test]
fn test_deleting_value_in_multiple_languages() {
    let dir = testing_directory(&[&EN, &SK]);
    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());

    let key = groups[0].localizations()[0].entries()[2].key().to_string();
    let base = groups[0].localization_mut("Base").unwrap();
    provider.delete(base, &key);

    let updated = provider.discover(dir.path());
    assert_eq!(updated[0].localizations()[0].len(), 5);
    assert!(!updated[0].localizations()[0].contains_key(&key));
    assert_eq!(updated[0].localizations()[1].len(), 6);
}

#[test]
fn test_deleting_absent_key_still_rewrites_in_canonical_form() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("en.lproj");
    fs::create_dir_all(&folder).unwrap();
    let path = folder.join("L.strings");
    fs::write(&path, "\"b\" = \"B\";\n\"a\" = \"A\";").unwrap();

    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());
    provider.delete(groups[0].localization_mut("en").unwrap(), "missing");

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\"a\" = \"A\";\n\n\"b\" = \"B\";\n\n"
    );
}

#[test]
fn test_ignored_directories_and_custom_config() {
    let dir = testing_directory(&[&EN]);
    let pods = dir.path().join("Pods").join("Lib").join("en.lproj");
    fs::create_dir_all(&pods).unwrap();
    fs::copy(fixture("InfoPlist-en.strings"), pods.join("Lib.strings")).unwrap();
    let text = dir.path().join("Project").join("Base.lproj").join("Notes.txt");
    fs::copy(fixture("InfoPlist-en.strings"), &text).unwrap();

    let groups = Provider::default().discover(dir.path());
    let names: Vec<_> = groups.iter().map(LocalizationGroup::name).collect();
    assert_eq!(names, vec!["LocalizableStrings.strings"]);

    let config = ProviderConfig::new()
        .with_ignored_directories(Vec::<String>::new())
        .with_extension("txt");
    let groups = Provider::new(config).discover(dir.path());
    let names: Vec<_> = groups.iter().map(LocalizationGroup::name).collect();
    assert_eq!(names, vec!["Lib.strings", "LocalizableStrings.strings", "Notes.txt"]);
}

#[test]
fn test_binary_property_list_is_read() {
    let dir = testing_directory(&[
        &EN,
        &TestFile {
            fixture: "Binary.strings",
            folder: "de.lproj",
            name: "LocalizableStrings.strings",
        },
    ]);
    let groups = Provider::default().discover(dir.path());
    let de = groups[0].localization("de").unwrap();

    assert_eq!(de.len(), 2);
    assert_eq!(de.entry("BACK").unwrap().value(), "Zurück");
    assert_eq!(de.entry("DONE").unwrap().value(), "Fertig");
    assert!(de.entries().iter().all(|e| e.message().is_none()));
}

#[test]
fn test_languages_are_unique_within_each_group() {
    let dir = testing_directory(&[&EN, &SK, &INFO_EN]);
    let project = dir.path().join("Project");
    // A language folder nested in another one, and a second Base folder
    // deeper in the tree, both map onto existing groups.
    let nested = project.join("sk.lproj").join("Base.lproj");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(fixture(SK_MISSING.fixture), nested.join(EN.name)).unwrap();
    let flat = project.join("Base.lproj").join("Base.lproj");
    fs::create_dir_all(&flat).unwrap();
    fs::copy(fixture(INFO_SK.fixture), flat.join(INFO_EN.name)).unwrap();

    let groups = Provider::default().discover(dir.path());
    assert_eq!(groups.len(), 2);
    for group in &groups {
        let mut languages: Vec<_> = group.languages().collect();
        let count = languages.len();
        languages.dedup();
        assert_eq!(languages.len(), count, "duplicate language in {}", group.name());
    }

    // The first file in path order wins.
    let base = find_group(&groups, EN.name)
        .unwrap()
        .localization("Base")
        .unwrap();
    assert_eq!(base.len(), 6);
    assert_eq!(base.path(), project.join("Base.lproj").join(EN.name));
}

#[test]
fn test_two_targets_with_the_same_table_stay_reachable() {
    let dir = tempfile::tempdir().unwrap();
    for (target, value) in [("AppA", "A"), ("AppB", "B")] {
        let folder = dir.path().join(target).join("en.lproj");
        fs::create_dir_all(&folder).unwrap();
        fs::write(
            folder.join("Localizable.strings"),
            format!("\"title\" = \"{}\";\n", value),
        )
        .unwrap();
    }

    let provider = Provider::default();
    let mut groups = provider.discover(dir.path());
    let names: Vec<String> = groups.iter().map(|g| g.name().to_string()).collect();
    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);

    let app_b = Path::new("AppB")
        .join("Localizable.strings")
        .to_string_lossy()
        .into_owned();
    let group = find_group_mut(&mut groups, &app_b).unwrap();
    let en = group.localization_mut("en").unwrap();
    assert_eq!(en.entry("title").unwrap().value(), "B");
    provider.update(en, "title", "B2", None);

    assert_eq!(
        fs::read_to_string(dir.path().join("AppB/en.lproj/Localizable.strings")).unwrap(),
        "\"title\" = \"B2\";\n\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("AppA/en.lproj/Localizable.strings")).unwrap(),
        "\"title\" = \"A\";\n"
    );
}

#[test]
fn test_groups_serialize_to_json() {
    let dir = testing_directory(&[&INFO_EN, &INFO_SK]);
    let groups = Provider::default().discover(dir.path());

    let json = serde_json::to_value(&groups).unwrap();
    assert_eq!(json[0]["name"], "InfoPlist.strings");
    assert_eq!(json[0]["localizations"][0]["language"], "Base");
    assert_eq!(json[0]["localizations"][1]["language"], "sk");
    assert_eq!(json[0]["localizations"][0]["entries"].as_array().unwrap().len(), 2);
}
