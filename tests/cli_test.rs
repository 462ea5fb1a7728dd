use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SEED: &str = "Erik\ten\tpt\tÉrico\t2024-01-01T10:00:00.000000\n\
ERIK\ten\tfr\tÉric\t2024-01-01T10:00:01.000000\n\
this line is malformed\n\
Bob\ten\tpt\tRoberto\t2024-01-01T10:00:02.000000\n\
Tree\ten\tpt\tÁrvore\t2024-01-01T10:00:03.000000\n";

struct Notebook {
    dir: TempDir,
}

impl Notebook {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn seeded() -> Self {
        let nb = Self::new();
        fs::write(nb.data_file(), SEED).unwrap();
        nb
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("dictionary_v2.txt")
    }

    fn history_file(&self) -> PathBuf {
        self.dir.path().join("history.log")
    }

    fn dict(&self) -> Command {
        let mut cmd = Command::cargo_bin("dict").unwrap();
        cmd.current_dir(self.dir.path())
            .env("DICT_FILE", self.data_file())
            .env("DICT_HISTORY_FILE", self.history_file())
            .env("DICT_USER", "tester")
            .env("DICT_TRANSLATOR_URL", "http://127.0.0.1:9")
            .env("DICT_TRANSLATOR_TIMEOUT_SECS", "2")
            .env_remove("DICT_LAYOUT")
            .env_remove("DICT_PAGE_SIZE")
            .env_remove("DICT_COMPACT_SOURCE_LANG")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_help_flag() {
    Notebook::new()
        .dict()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline dictionary notebook"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_missing_command_exits_with_one() {
    Notebook::new().dict().assert().code(1);
}

#[test]
fn test_unknown_command_exits_with_one() {
    Notebook::new().dict().arg("translate").assert().code(1);
}

#[test]
fn test_missing_word_exits_with_one() {
    Notebook::new()
        .dict()
        .arg("read")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_read_matches_exact_word_ignoring_case() {
    Notebook::seeded()
        .dict()
        .args(["read", "erik"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translation: Érico"))
        .stdout(predicate::str::contains("Translation: Éric\n"))
        .stdout(predicate::str::contains("Roberto").not());
}

#[test]
fn test_read_unknown_word() {
    Notebook::seeded()
        .dict()
        .args(["read", "eri"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry found for that word."));
}

#[test]
fn test_missing_file_lists_nothing() {
    Notebook::new()
        .dict()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_list_page_uses_configured_page_size() {
    Notebook::seeded()
        .dict()
        .env("DICT_PAGE_SIZE", "3")
        .args(["list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry #4"))
        .stdout(predicate::str::contains("Word: Tree"))
        .stdout(predicate::str::contains("Page 2/2"))
        .stdout(predicate::str::contains("Word: Bob").not());
}

#[test]
fn test_list_rejects_page_zero() {
    Notebook::seeded()
        .dict()
        .args(["list", "--page", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Page 0/").not());
}

#[test]
fn test_search_by_field() {
    let nb = Notebook::seeded();

    nb.dict()
        .args(["search", "RVO", "--field", "translation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Word: Tree"));

    nb.dict()
        .args(["search", "arvo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));

    nb.dict()
        .args(["search", "x", "--field", "colour"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid field 'colour'"));
}

#[test]
fn test_remove_deletes_all_matches_and_logs_them() {
    let nb = Notebook::seeded();

    nb.dict()
        .args(["remove", "erik"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 entry(ies)"));

    let data = fs::read_to_string(nb.data_file()).unwrap();
    assert_eq!(data.lines().count(), 2);
    assert!(!data.contains("Erik"));
    assert!(!data.contains("malformed"));

    let history = fs::read_to_string(nb.history_file()).unwrap();
    assert_eq!(history.matches(" | REMOVE | ").count(), 2);
    assert!(history.contains(" | REMOVE | ERIK | en-fr | user: tester"));

    nb.dict()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains(" | REMOVE | Erik | en-pt | user: tester"));
}

#[test]
fn test_edit_reads_answers_from_stdin_and_touches_first_match() {
    let nb = Notebook::seeded();

    nb.dict()
        .args(["edit", "erik"])
        .write_stdin("\n\n\nEriquinho\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry updated:"));

    let data = fs::read_to_string(nb.data_file()).unwrap();
    let lines: Vec<&str> = data.lines().collect();
    assert!(lines[0].starts_with("Erik\ten\tpt\tEriquinho\t"));
    assert_eq!(lines[1], "ERIK\ten\tfr\tÉric\t2024-01-01T10:00:01.000000");
}

#[test]
fn test_history_starts_empty() {
    Notebook::new()
        .dict()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded yet."));
}

#[test]
fn test_new_rejects_unsupported_language_before_translating() {
    let nb = Notebook::seeded();

    nb.dict()
        .args(["new", "casa", "xx"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported language 'xx'"));

    assert_eq!(fs::read_to_string(nb.data_file()).unwrap(), SEED);
}

#[test]
fn test_new_reports_translation_failure() {
    let nb = Notebook::seeded();

    nb.dict()
        .args(["new", "casa", "en", "--from", "pt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert_eq!(fs::read_to_string(nb.data_file()).unwrap(), SEED);
    assert!(!nb.history_file().exists());
}

#[test]
fn test_compact_layout_reads_three_field_notes() {
    let nb = Notebook::new();
    fs::write(nb.data_file(), "casa\ten\thouse\nbroken\n").unwrap();

    nb.dict()
        .args(["--compact", "read", "CASA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translation: house"))
        .stdout(predicate::str::contains("Languages: pt → en"));
}

#[test]
fn test_compact_layout_refuses_another_source_language() {
    let nb = Notebook::new();
    fs::write(nb.data_file(), "casa\ten\thouse\n").unwrap();

    nb.dict()
        .args(["--compact", "new", "Tree", "pt", "--from", "en"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only holds 'pt' words"));

    assert_eq!(fs::read_to_string(nb.data_file()).unwrap(), "casa\ten\thouse\n");
    assert!(!nb.history_file().exists());
}

#[test]
fn test_menu_quits_cleanly() {
    Notebook::seeded()
        .dict()
        .arg("menu")
        .write_stdin("4\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("MAIN MENU"))
        .stdout(predicate::str::contains("Word: Erik"))
        .stdout(predicate::str::contains("Goodbye!"));
}
