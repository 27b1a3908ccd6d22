use desktop_dialogs::desktop_entry::KeyFile;
use desktop_dialogs::shared::fs_atomic::atomic_write_file;
use std::fs;

#[test]
fn saving_twice_leaves_only_the_launcher_behind() {
    let temp = tempfile::tempdir().expect("tempdir");
    let apps = temp.path().join("applications");
    fs::create_dir(&apps).expect("mkdir");
    let target = apps.join("editor.desktop");

    let mut entry = KeyFile::parse("[Desktop Entry]\nType=Application\nName=Editor\n")
        .expect("parse");
    atomic_write_file(&target, entry.to_data().as_bytes()).expect("first save");
    entry.set_string("Desktop Entry", "Name", "Text Editor");
    atomic_write_file(&target, entry.to_data().as_bytes()).expect("second save");

    let saved = KeyFile::parse(&fs::read_to_string(&target).expect("read")).expect("reload");
    assert_eq!(
        saved.string("Desktop Entry", "Name").as_deref(),
        Some("Text Editor")
    );

    let names: Vec<String> = fs::read_dir(&apps)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["editor.desktop".to_string()]);
}

#[test]
fn directory_target_is_left_untouched() {
    let temp = tempfile::tempdir().expect("tempdir");
    let folder = temp.path().join("Launchers.desktop");
    fs::create_dir(&folder).expect("mkdir");

    assert!(atomic_write_file(&folder, b"[Desktop Entry]\n").is_err());
    assert!(folder.is_dir());
    assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 1);
}
