/*!
 * End-to-end tests for FileGather: browsing, selecting and exporting
 */

use std::cell::Cell;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::tempdir;

use crate::export::tests::{test_commands, Launch, RecordingLauncher};
use crate::export::{ExportMode, ExportOutcome, ExportPipeline};
use crate::navigation::{Command, Navigator};
use crate::scanner::{DirectoryLister, ScanError, Scanner};
use crate::tree::TreeModel;
use crate::types::DirEntryInfo;

// Helper function to create the sample directory structure
//
//   a.txt
//   sub/b.txt
//   Z.txt
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("sub"))?;

    let mut a = File::create(temp_dir.path().join("a.txt"))?;
    write!(a, "alpha")?;

    let mut b = File::create(temp_dir.path().join("sub").join("b.txt"))?;
    writeln!(b, "bravo")?;

    let mut z = File::create(temp_dir.path().join("Z.txt"))?;
    writeln!(z, "zulu")?;

    Ok(temp_dir)
}

/// Real scanner that counts how often it is called
struct CountingScanner {
    inner: Scanner,
    calls: Rc<Cell<usize>>,
}

impl DirectoryLister for CountingScanner {
    fn list(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ScanError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.list(path)
    }
}

fn navigator_for(root: &Path) -> Navigator {
    Navigator::new(TreeModel::new(root, Box::new(Scanner::default())))
}

fn move_to(nav: &mut Navigator, target: &Path) {
    let rows = nav.tree().visible().len();
    for _ in 0..rows {
        nav.apply(Command::MoveUp);
    }
    // Walk down the visible rows until the cursor reaches the target
    for _ in 0..rows {
        if nav.cursor_path() == target {
            return;
        }
        nav.apply(Command::MoveDown);
    }
    assert_eq!(nav.cursor_path(), target, "target row not visible");
}

#[test]
fn test_root_listing_order() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let entries = Scanner::default().list(temp_dir.path()).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["sub", "a.txt", "Z.txt"]);
    Ok(())
}

#[test]
fn test_editor_export_follows_selection_order() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let spool = tempdir()?;
    let root = temp_dir.path();
    let mut nav = navigator_for(root);

    move_to(&mut nav, &root.join("a.txt"));
    nav.apply(Command::ToggleSelect);

    // Back up to sub, open it and select b.txt
    move_to(&mut nav, root);
    nav.apply(Command::MoveDown);
    nav.apply(Command::ExpandOrInto);
    nav.apply(Command::ExpandOrInto);
    assert_eq!(nav.cursor_path(), root.join("sub").join("b.txt"));
    nav.apply(Command::Activate);

    let launcher = RecordingLauncher::default();
    let pipeline = ExportPipeline::new(root, test_commands(), Box::new(launcher.clone()))
        .with_temp_dir(spool.path());
    let outcome = pipeline
        .export(nav.selection(), ExportMode::Editor)
        .unwrap();

    let ExportOutcome::Opened { artifact, .. } = outcome else {
        panic!("expected the editor to be started");
    };
    let content = fs::read_to_string(&artifact)?;
    let sub_b = Path::new("sub").join("b.txt").display().to_string();
    assert_eq!(
        content,
        format!("a.txt\n\n```\nalpha\n```\n\n{}\n\n```\nbravo\n```\n\n", sub_b)
    );
    assert_eq!(
        *launcher.launches.borrow(),
        vec![Launch::Detached("gedit".to_string(), artifact)]
    );
    Ok(())
}

#[test]
fn test_clipboard_fallback_after_primary_fails() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    let mut nav = navigator_for(root);

    move_to(&mut nav, &root.join("Z.txt"));
    nav.apply(Command::ToggleSelect);
    move_to(&mut nav, root);
    move_to(&mut nav, &root.join("a.txt"));
    nav.apply(Command::ToggleSelect);

    let launcher = RecordingLauncher::failing(&["wl-copy"]);
    let pipeline = ExportPipeline::new(root, test_commands(), Box::new(launcher.clone()));
    let outcome = pipeline
        .export(nav.selection(), ExportMode::Clipboard)
        .unwrap();

    assert!(matches!(outcome, ExportOutcome::Copied { .. }));
    let launches = launcher.launches.borrow();
    assert_eq!(launches.len(), 2);
    let (Launch::Piped(first, first_input), Launch::Piped(second, second_input)) =
        (&launches[0], &launches[1])
    else {
        panic!("expected two piped launches");
    };
    assert_eq!(first, "wl-copy");
    assert_eq!(second, "xclip");
    assert_eq!(first_input, second_input);
    assert_eq!(
        String::from_utf8(second_input.clone()).unwrap(),
        "Z.txt\n\nzulu\n\n---\n\na.txt\n\nalpha\n\n---\n\n"
    );
    Ok(())
}

#[test]
fn test_file_vanishing_before_export_is_annotated() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    let mut nav = navigator_for(root);

    move_to(&mut nav, &root.join("a.txt"));
    nav.apply(Command::ToggleSelect);
    nav.apply(Command::MoveDown);
    nav.apply(Command::ToggleSelect);

    fs::remove_file(root.join("a.txt"))?;

    let launcher = RecordingLauncher::default();
    let pipeline = ExportPipeline::new(root, test_commands(), Box::new(launcher.clone()));
    let outcome = pipeline
        .export(nav.selection(), ExportMode::Clipboard)
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::Copied { .. }));

    let launches = launcher.launches.borrow();
    let Launch::Piped(_, input) = &launches[0] else {
        panic!("expected a piped launch");
    };
    let text = String::from_utf8(input.clone()).unwrap();
    let (first, rest) = text.split_once("\n---\n\n").unwrap();
    assert!(first.starts_with("a.txt\n\nerror reading file: "));
    assert_eq!(rest, "Z.txt\n\nzulu\n\n---\n\n");
    Ok(())
}

#[test]
fn test_reexpand_does_not_rescan() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    let calls = Rc::new(Cell::new(0));
    let scanner = CountingScanner {
        inner: Scanner::default(),
        calls: Rc::clone(&calls),
    };
    let mut nav = Navigator::new(TreeModel::new(root, Box::new(scanner)));
    assert_eq!(calls.get(), 1);

    nav.apply(Command::MoveDown);
    nav.apply(Command::Activate);
    assert_eq!(calls.get(), 2);
    let children: Vec<PathBuf> = nav
        .tree()
        .node(nav.cursor())
        .expansion
        .children()
        .iter()
        .map(|&id| nav.tree().node(id).path.clone())
        .collect();

    for _ in 0..3 {
        nav.apply(Command::CollapseOrUp);
        nav.apply(Command::ExpandOrInto);
    }

    let again: Vec<PathBuf> = nav
        .tree()
        .node(nav.cursor())
        .expansion
        .children()
        .iter()
        .map(|&id| nav.tree().node(id).path.clone())
        .collect();
    assert_eq!(children, again);
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn test_empty_export_writes_and_launches_nothing() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let spool = tempdir()?;
    let nav = navigator_for(temp_dir.path());

    let launcher = RecordingLauncher::default();
    let pipeline =
        ExportPipeline::new(temp_dir.path(), test_commands(), Box::new(launcher.clone()))
            .with_temp_dir(spool.path());

    for mode in [ExportMode::Editor, ExportMode::Clipboard] {
        assert_eq!(
            pipeline.export(nav.selection(), mode).unwrap(),
            ExportOutcome::EmptySelection
        );
    }
    assert!(launcher.launches.borrow().is_empty());
    assert_eq!(fs::read_dir(spool.path())?.count(), 0);
    Ok(())
}

// Other unix filesystems may refuse names that are not UTF-8
#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_exports_content() -> io::Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    fs::write(root.join(OsStr::from_bytes(b"caf\xe9.txt")), b"espresso\xff\n")?;

    let mut nav = navigator_for(root);
    nav.apply(Command::MoveDown);
    nav.apply(Command::ToggleSelect);
    assert_eq!(nav.selection().len(), 1);

    let launcher = RecordingLauncher::default();
    let pipeline = ExportPipeline::new(root, test_commands(), Box::new(launcher.clone()));
    pipeline
        .export(nav.selection(), ExportMode::Clipboard)
        .unwrap();

    let launches = launcher.launches.borrow();
    let Launch::Piped(_, input) = &launches[0] else {
        panic!("expected a piped launch");
    };
    let mut expected = "caf\u{FFFD}.txt\n\n".as_bytes().to_vec();
    expected.extend_from_slice(b"espresso\xff\n\n---\n\n");
    assert_eq!(*input, expected);
    Ok(())
}

#[test]
fn test_vanished_directory_browses_as_empty() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    let sub = root.join("sub");
    let mut nav = navigator_for(root);

    // Listed with the root, gone before it is opened
    fs::remove_dir_all(&sub)?;
    nav.apply(Command::MoveDown);
    nav.apply(Command::ExpandOrInto);
    nav.apply(Command::ExpandOrInto);

    assert_eq!(nav.cursor_path(), sub);
    let node = nav.tree().node(nav.cursor());
    assert!(node.expansion.is_expanded());
    assert!(node.expansion.children().is_empty());

    // Browsing continues elsewhere
    nav.apply(Command::MoveDown);
    assert_eq!(nav.cursor_path(), root.join("a.txt"));
    Ok(())
}
