//! Integration tests for the verbatim CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn verbatim() -> Command {
    Command::cargo_bin("verbatim").unwrap()
}

#[test]
fn test_prepare_from_stdin() {
    verbatim()
        .arg("prepare")
        .write_stdin("Please contact John Smith today\tPor favor contacte a John Smith hoy\n")
        .assert()
        .success()
        .stdout("Please contact John Smith today\tO O B-DNT I-DNT O\n")
        .stderr(predicate::str::contains("prepare: records: 1"));
}

#[test]
fn test_prepare_conll() {
    verbatim()
        .args(["prepare", "-f", "conll"])
        .write_stdin("IBM rocks\tIBM mola\n")
        .assert()
        .success()
        .stdout("IBM\tB-DNT\nrocks\tO\n\n");
}

#[test]
fn test_prepare_unknown_format() {
    verbatim()
        .args(["prepare", "-f", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format requested: xml"));
}

#[test]
fn test_cut_then_paste_round_trip() {
    let dir = TempDir::new().unwrap();
    let tagged = dir.path().join("tagged.tsv");
    let cut = dir.path().join("cut.tsv");
    fs::write(&tagged, "Donate to the Red Cross now\tO O O ORG ORG O\n").unwrap();

    verbatim()
        .arg("cut")
        .arg("-i")
        .arg(&tagged)
        .arg("-o")
        .arg(&cut)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&cut).unwrap(),
        "Donate to the DNT_ORG_1 now\t{\"ORG\":[\"Red Cross\"]}\n"
    );

    verbatim()
        .arg("paste")
        .arg("-i")
        .arg(&cut)
        .assert()
        .success()
        .stdout("Donate to the Red Cross now\n");
}

#[test]
fn test_cut_flat_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("verbatim.toml");
    fs::write(&config, "[processing]\nside_channel = \"flat\"\n").unwrap();

    verbatim()
        .arg("-c")
        .arg(&config)
        .arg("cut")
        .write_stdin("Donate to the Red Cross now\tO O O B-DNT I-DNT O\n")
        .assert()
        .success()
        .stdout("Donate to the DNT_1 now\tRed|+|Cross\n");
}

#[test]
fn test_align_lenient_and_strict() {
    let input = "a b c x b\ta b c\n";
    verbatim()
        .arg("align")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("DNT_1 x b\tDNT_1\ta|+|b|+|c\n")
        .stderr(predicate::str::contains("unmatched runs: 1"));

    verbatim()
        .args(["align", "--strict"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no phrase matches source DNT token"));
}

#[test]
fn test_paste_errors() {
    verbatim()
        .arg("paste")
        .write_stdin("DNT_2 x\tonly\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("index out of range"));

    verbatim()
        .args(["paste", "--ignore-errors"])
        .write_stdin("DNT_2 x\tonly\n")
        .assert()
        .success()
        .stdout(" x\n")
        .stderr(predicate::str::contains("restore errors: 1"));
}

#[test]
fn test_malformed_abort_and_skip() {
    verbatim()
        .arg("paste")
        .write_stdin("no side channel\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed record at line 1"));

    verbatim()
        .args(["paste", "--skip-malformed"])
        .write_stdin("no side channel\nDNT_1 here\tIBM\n")
        .assert()
        .success()
        .stdout("IBM here\n")
        .stderr(predicate::str::contains("malformed skipped: 1"));
}

#[test]
fn test_ner_cut() {
    verbatim()
        .arg("ner-cut")
        .write_stdin("Call Ana at 555\tLlama a Ana al 555\n")
        .assert()
        .success()
        .stdout(
            "Call DNT_MISC_1 at DNT_NUMBER_1\tLlama a DNT_MISC_1 al DNT_NUMBER_1\t{\"MISC\":[\"Ana\"],\"NUMBER\":[\"555\"]}\n",
        );
}

#[test]
fn test_ner_cut_with_copy_fallback() {
    verbatim()
        .args(["ner-cut", "--copy-fallback"])
        .write_stdin("Meet Ana at café\tVer a Ana en café\n")
        .assert()
        .success()
        .stdout(
            "Meet DNT_MISC_1 at DNT_NONLATIN_1\tVer a DNT_MISC_1 en DNT_NONLATIN_1\t{\"MISC\":[\"Ana\"],\"NONLATIN\":[\"café\"]}\n",
        );
}

#[test]
fn test_copy_marks_tokens() {
    verbatim()
        .arg("copy")
        .write_stdin("RT @alice : great news\n#a #b #c #d TPLFs\n")
        .assert()
        .success()
        .stdout("@@RT @@@alice @@: great news\n@@#a @@#b @@#c @@#d @@TPLFs\n")
        .stderr(predicate::str::contains("copy: records: 2"));
}

#[test]
fn test_copy_with_dictionary_file() {
    let dir = TempDir::new().unwrap();
    let dict = dir.path().join("dict.txt");
    let antidict = dir.path().join("antidict.txt");
    fs::write(&dict, "facebook\nnews\n").unwrap();
    fs::write(&antidict, "news\n").unwrap();

    verbatim()
        .args(["copy", "--symbol", "<c>", "--exclude-punct", "-D"])
        .arg(&dict)
        .arg("-N")
        .arg(&antidict)
        .write_stdin("Facebook news today .\n")
        .assert()
        .success()
        .stdout("<c>Facebook news today .\n");
}

#[test]
fn test_copy_missing_dictionary() {
    verbatim()
        .args(["copy", "-D", "/nonexistent/dict.txt"])
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_train_tag_eval() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("dnt.json");
    let train = "Ask John about IBM\tO B-DNT O B-DNT\nIBM hired Mary\tB-DNT O B-DNT\n";

    verbatim()
        .arg("train")
        .arg(&model)
        .write_stdin(train)
        .assert()
        .success();
    assert!(model.exists());

    verbatim()
        .arg("tag")
        .arg(&model)
        .write_stdin("Mary met John\n")
        .assert()
        .success()
        .stdout("Mary met John\tB-DNT O B-DNT\n");

    verbatim()
        .arg("eval")
        .arg(&model)
        .write_stdin(train)
        .assert()
        .success()
        .stdout(predicate::str::contains("(Average)"))
        .stdout(predicate::str::contains("B-DNT"));

    verbatim()
        .args(["eval", "--json"])
        .arg(&model)
        .write_stdin(train)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"average\""));
}

#[test]
fn test_train_without_records_fails() {
    let dir = TempDir::new().unwrap();
    verbatim()
        .arg("train")
        .arg(dir.path().join("dnt.json"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no labeled records"));
}

#[test]
fn test_glob_input_in_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.tsv"), "IBM\tIBM\n").unwrap();
    fs::write(dir.path().join("b.tsv"), "hello\thola\n").unwrap();
    let pattern = dir.path().join("*.tsv");

    verbatim()
        .args(["prepare", "-f", "tags", "-i"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stdout("B-DNT\nO\n");
}

#[test]
fn test_missing_input_file() {
    verbatim()
        .args(["paste", "-i", "/nonexistent/input.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_quiet_suppresses_summary() {
    verbatim()
        .args(["-q", "paste"])
        .write_stdin("DNT_1\tIBM\n")
        .assert()
        .success()
        .stdout("IBM\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_list_formats() {
    verbatim()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src-tags"))
        .stdout(predicate::str::contains("conll"))
        .stdout(predicate::str::contains("typed"));
}
