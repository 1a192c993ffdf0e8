//! Loading through the real process environment.
//!
//! These tests mutate process-wide state (variables and the working
//! directory), so every one of them runs under `#[serial]`.

use std::env;
use std::io::Write;
use std::path::Path;

use app_config::{Config, dotenv::load_dotenv};
use serial_test::serial;

fn write_env_file(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join(".env");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn clear(keys: &[&str]) {
    for key in keys {
        unsafe {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn load_dotenv_keeps_process_values_and_fills_gaps() {
    let keys = ["APP_CONFIG_TEST_PROCESS_WINS", "APP_CONFIG_TEST_FILE_ONLY"];
    clear(&keys);

    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(
        dir.path(),
        "APP_CONFIG_TEST_PROCESS_WINS=file\nAPP_CONFIG_TEST_FILE_ONLY=file\n",
    );

    unsafe {
        env::set_var("APP_CONFIG_TEST_PROCESS_WINS", "process");
    }

    assert_eq!(load_dotenv(Some(path.as_path())), Some(path.clone()));
    assert_eq!(env::var("APP_CONFIG_TEST_PROCESS_WINS").as_deref(), Ok("process"));
    assert_eq!(env::var("APP_CONFIG_TEST_FILE_ONLY").as_deref(), Ok("file"));

    clear(&keys);
}

#[test]
#[serial]
fn load_reads_addr_from_dotenv_in_working_directory() {
    let keys = ["ADDR", "SECRET_KEY"];
    clear(&keys);

    let dir = tempfile::tempdir().unwrap();
    write_env_file(dir.path(), "ADDR=:4321\nSECRET_KEY=from-dotenv\n");

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = Config::load([]);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.addr, ":4321");
    assert_eq!(config.secret_key, b"from-dotenv");
    assert_eq!(config.database, None);

    clear(&keys);
}

#[test]
#[serial]
fn builder_env_file_does_not_override_process() {
    let keys = ["ADDR", "SECRET_KEY"];
    clear(&keys);

    let dir = tempfile::tempdir().unwrap();
    let path = write_env_file(dir.path(), "ADDR=:4321\nSECRET_KEY=from-file\n");

    unsafe {
        env::set_var("ADDR", ":3000");
    }

    let config = Config::builder().env_file(&path).build();
    assert_eq!(config.addr, ":3000");
    assert_eq!(config.secret_key, b"from-file");

    clear(&keys);
}
