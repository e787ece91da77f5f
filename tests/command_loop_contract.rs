#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use assert_cmd::Command;

fn micmd() -> Command {
    let mut cmd = Command::cargo_bin("micmd").unwrap();
    // Keep the contract independent of the invoking environment.
    cmd.env_remove("MICMD_PROMPT")
        .env_remove("MICMD_EXEC_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn exec_file_query_with_no_loaded_executable_answers_empty_value() {
    micmd()
        .write_stdin("-micmd-get-exec-file\n")
        .assert()
        .success()
        .stdout("^done,value=\"\"\n(gdb)\n");
}

#[test]
fn exec_file_query_reports_the_configured_executable() {
    micmd()
        .env("MICMD_EXEC_FILE", "/bin/cat")
        .write_stdin("-micmd-get-exec-file\n")
        .assert()
        .success()
        .stdout("^done,value=\"/bin/cat\"\n(gdb)\n");
}

#[test]
fn request_tokens_are_echoed_on_result_records() {
    micmd()
        .write_stdin("7-micmd-get-exec-file\n")
        .assert()
        .success()
        .stdout("7^done,value=\"\"\n(gdb)\n");
}

#[test]
fn loading_an_executable_changes_what_the_query_observes() {
    let input = "-micmd-get-exec-file\n\
                 -file-exec-and-symbols /tmp/prog\n\
                 -micmd-get-exec-file\n";
    let expected = "^done,value=\"\"\n\
                    (gdb)\n\
                    ^done\n\
                    (gdb)\n\
                    ^done,value=\"/tmp/prog\"\n\
                    (gdb)\n";
    micmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn quoted_paths_round_trip_through_the_protocol() {
    let input = "-file-exec-and-symbols \"odd \\\"name\\\"/prog\"\n\
                 -micmd-get-exec-file\n";
    let expected = "^done\n\
                    (gdb)\n\
                    ^done,value=\"odd \\\"name\\\"/prog\"\n\
                    (gdb)\n";
    micmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn unknown_commands_answer_an_error_record_and_the_loop_continues() {
    let input = "5-no-such-command\n\
                 6-micmd-get-exec-file\n";
    let expected = "5^error,msg=\"Undefined MI command: -no-such-command\"\n\
                    (gdb)\n\
                    6^done,value=\"\"\n\
                    (gdb)\n";
    micmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn near_miss_command_names_get_a_closest_match_hint() {
    micmd()
        .write_stdin("-micmd-get-exec-fil\n")
        .assert()
        .success()
        .stdout(
            "^error,msg=\"Undefined MI command: -micmd-get-exec-fil \
             (closest match: -micmd-get-exec-file)\"\n(gdb)\n",
        );
}

#[test]
fn an_unterminated_quote_is_a_malformed_request_not_a_crash() {
    let input = "-micmd-get-exec-file \"oops\n\
                 -micmd-get-exec-file\n";
    let expected = "^error,msg=\"malformed request: unterminated quoted string\"\n\
                    (gdb)\n\
                    ^done,value=\"\"\n\
                    (gdb)\n";
    micmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn surplus_arguments_to_the_query_are_an_invocation_error() {
    micmd()
        .write_stdin("-micmd-get-exec-file surplus\n")
        .assert()
        .success()
        .stdout("^error,msg=\"-micmd-get-exec-file takes no arguments, got 1\"\n(gdb)\n");
}

#[test]
fn interleaved_failures_preserve_response_order() {
    let input = "1-micmd-get-exec-file\n\
                 2-no-such-command\n\
                 3-micmd-get-exec-file\n";
    let expected = "1^done,value=\"\"\n\
                    (gdb)\n\
                    2^error,msg=\"Undefined MI command: -no-such-command\"\n\
                    (gdb)\n\
                    3^done,value=\"\"\n\
                    (gdb)\n";
    micmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn the_prompt_terminator_can_be_disabled_from_the_environment() {
    micmd()
        .env("MICMD_PROMPT", "off")
        .write_stdin("-micmd-get-exec-file\n")
        .assert()
        .success()
        .stdout("^done,value=\"\"\n");
}
