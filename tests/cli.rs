use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

/// Runs the binary from an empty directory with no keys and no config file.
fn climachat_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("climachat").expect("binary should be built");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("CLIMACHAT_CONFIG", dir.path().join("missing.yaml"))
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn one_shot_chat_without_key_prints_inline_error() {
    let dir = TempDir::new().unwrap();
    climachat_cmd(&dir)
        .arg("hola")
        .assert()
        .success()
        .stdout(contains("Usuario: hola"))
        .stdout(contains("Chatbot: Error: La API Key de OpenAI no está configurada."));
}

#[test]
fn one_shot_weather_without_key_prints_inline_error() {
    let dir = TempDir::new().unwrap();
    climachat_cmd(&dir)
        .args(["--mode", "weather", "Madrid"])
        .assert()
        .success()
        .stdout(contains("Usuario: Madrid"))
        .stdout(contains("Error: La API Key de OpenWeather no está configurada."));
}

#[test]
fn piped_stdin_is_sent_as_one_message() {
    let dir = TempDir::new().unwrap();
    climachat_cmd(&dir)
        .args(["-m", "clima"])
        .write_stdin("Lima\n")
        .assert()
        .success()
        .stdout(contains("Usuario: Lima"))
        .stdout(contains("OpenWeather"));
}

#[test]
fn empty_stdin_is_an_error() {
    let dir = TempDir::new().unwrap();
    climachat_cmd(&dir)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("No message provided"));
}

#[test]
fn malformed_config_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "default_mode: [oops").unwrap();

    climachat_cmd(&dir)
        .arg("--config")
        .arg(&config_path)
        .arg("hola")
        .assert()
        .failure()
        .stderr(contains("Configuration error").and(contains("config.yaml")));
}

#[test]
fn config_file_sets_default_mode() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "default_mode: weather\n").unwrap();

    climachat_cmd(&dir)
        .env("CLIMACHAT_CONFIG", &config_path)
        .arg("Quito")
        .assert()
        .success()
        .stdout(contains("OpenWeather"));
}
