use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const TODAY: &str = "15/06/2025";
const PHONE: &str = "9876543210";
const PASSWORD: &str = "secret1";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tanker"))
}

/// Isolated data, config and XDG directories for one test.
struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let root = TempDir::new().expect("temp dir");
        for dir in ["data", "config", "xdg-data"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create dir");
        }
        Self { root }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(bin())
            .arg("--data-dir")
            .arg(self.path("data"))
            .args(["--today", TODAY])
            .args(args)
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("XDG_DATA_HOME", self.path("xdg-data"))
            .env("TANKER_CONFIG", self.path("config").join("missing.toml"))
            .env_remove("TANKER_DATA_DIR")
            .env_remove("TANKER_PASSWORD")
            .env("NO_COLOR", "1")
            .output()
            .expect("run tanker")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "tanker {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run_ok(&full);
        serde_json::from_str(&stdout).expect("json output")
    }

    fn register_customer(&self) {
        self.run_ok(&[
            "register",
            "--name",
            "Asha Patil",
            "--phone",
            PHONE,
            "--password",
            PASSWORD,
            "--address",
            "12 Lake Road, Pune",
        ]);
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect()
}

#[test]
fn test_mask_date_and_time() {
    let env = TestEnv::new();
    assert_eq!(env.run_ok(&["--format", "plain", "mask", "date", "15062025"]).trim(), "15/06/2025");
    assert_eq!(env.run_ok(&["--format", "plain", "mask", "date", "1a5b0"]).trim(), "15/0");
    assert_eq!(env.run_ok(&["--format", "plain", "mask", "time", "93045"]).trim(), "93:04");

    let value = env.run_json(&["mask", "date", "150620251234"]);
    assert_eq!(value["masked"], "15/06/2025");
    assert_eq!(value["complete"], true);
}

#[test]
fn test_check_date_exit_codes() {
    let env = TestEnv::new();

    let expired = env.run(&["--format", "plain", "check-date", "15062025", "--policy", "not-expired"]);
    assert_eq!(expired.status.code(), Some(1));
    assert!(stderr(&expired).contains("expired"), "{}", stderr(&expired));

    let tomorrow = env.run_ok(&["--format", "plain", "check-date", "16062025", "--policy", "not-expired"]);
    assert!(tomorrow.contains("16/06/2025 is valid"));

    let leap = env.run(&["check-date", "29022023"]);
    assert_eq!(leap.status.code(), Some(1));
    assert!(stderr(&leap).contains("malformed"));

    let value = env.run_json(&["check-date", "15062025", "--policy", "not-in-past"]);
    assert_eq!(value["result"]["outcome"], "valid");
    assert_eq!(value["today"], "2025-06-15");
}

#[test]
fn test_register_and_login() {
    let env = TestEnv::new();
    env.register_customer();

    let login = env.run_json(&["login", "--phone", PHONE, "--password", PASSWORD]);
    assert_eq!(login["screen"], "customer-dashboard");
    assert_eq!(login["user"]["name"], "Asha Patil");
    assert!(login["user"].get("passwordHash").is_none());

    let wrong = env.run(&["login", "--phone", PHONE, "--password", "nope123"]);
    assert_eq!(wrong.status.code(), Some(1));
    assert!(stderr(&wrong).contains("Invalid phone number or password"));

    let duplicate = env.run(&[
        "register", "--name", "Asha", "--phone", PHONE, "--password", PASSWORD, "--address",
        "12 Lake Road, Pune",
    ]);
    assert_eq!(duplicate.status.code(), Some(1));
}

#[test]
fn test_book_and_track_orders() {
    let env = TestEnv::new();
    env.register_customer();

    let order = env.run_json(&[
        "book", "--phone", PHONE, "--password", PASSWORD, "--date", "20062025", "--time", "0930",
        "--meridiem", "pm", "--size", "20k", "--agency", "Blue Water",
    ]);
    assert_eq!(order["name"], "Asha Patil");
    assert_eq!(order["address"], "12 Lake Road, Pune");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totalAmount"], 1200);
    assert_eq!(order["time"], "09:30 PM");
    let booking_id = order["bookingId"].as_str().expect("booking id").to_string();
    assert!(booking_id.starts_with("BK-"));

    env.run_ok(&["orders", "status", &booking_id, "delivered"]);

    let listed = env.run_json(&["orders", "list", "--filter", "delivered"]);
    assert_eq!(listed["orders"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["counts"]["Delivered"], 1);
    assert_eq!(listed["counts"]["Pending"], 0);

    let plain = env.run_ok(&["--format", "plain", "orders", "list"]);
    assert!(plain.contains(&booking_id));
    assert!(plain.contains("21:30"));

    let history = env.run_json(&["orders", "history"]);
    assert_eq!(history["summary"]["completedOrders"], 1);
    assert_eq!(history["summary"]["totalRevenue"], 1200);
}

#[test]
fn test_booking_validation_lists_fields() {
    let env = TestEnv::new();
    let output = env.run(&[
        "--format", "plain", "book", "--name", "Asha", "--address", "12 Lake Road, Pune", "--date",
        "10062025", "--time", "0930", "--agency", "Blue Water",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error=Please fix the highlighted fields"), "{}", err);
    assert!(err.contains("field.date=Date cannot be in the past"), "{}", err);
    assert!(err.contains("field.tankerSize=Select tanker quantity"), "{}", err);
    assert!(!env.path("data").join("water_tanker_orders.json").exists());
}

#[test]
fn test_order_history_export_writes_csv() {
    let env = TestEnv::new();
    env.run_ok(&[
        "book", "--name", "Ravi", "--address", "4 Hill View, Nashik", "--date", "18062025",
        "--time", "1000", "--size", "10k", "--agency", "Aqua, Ltd",
    ]);

    let out_dir = env.path("exports");
    let out_arg = out_dir.to_string_lossy().to_string();
    env.run_ok(&["orders", "history", "--export", &out_arg]);

    let files = files_with_prefix(&out_dir, "Order_History_");
    assert_eq!(files.len(), 1);
    let csv = std::fs::read_to_string(&files[0]).expect("read csv");
    assert!(csv.starts_with("S.No,Booking ID,"));
    assert!(csv.contains("\"Aqua, Ltd\""));
}

#[test]
fn test_bank_primary_switch() {
    let env = TestEnv::new();
    let first = env.run_json(&[
        "bank", "add", "--bank", "State Bank", "--account-number", "123456789012", "--holder",
        "Asha Patil", "--ifsc", "SBIN0001234", "--branch", "Kothrud",
    ]);
    assert_eq!(first["isPrimary"], true);
    assert_eq!(first["maskedAccountNumber"], "********9012");

    let second = env.run_json(&[
        "bank", "add", "--bank", "HDFC", "--account-number", "987654321098", "--holder",
        "Asha Patil", "--ifsc", "hdfc0000123", "--branch", "Baner",
    ]);
    assert_eq!(second["isPrimary"], false);
    assert_eq!(second["ifscCode"], "HDFC0000123");

    let second_id = second["id"].as_str().expect("id").to_string();
    env.run_ok(&["bank", "primary", &second_id]);

    let accounts = env.run_json(&["bank", "list"]);
    let primaries: Vec<&str> = accounts
        .as_array()
        .expect("array")
        .iter()
        .filter(|a| a["isPrimary"] == true)
        .filter_map(|a| a["bankName"].as_str())
        .collect();
    assert_eq!(primaries, vec!["HDFC"]);

    env.run_ok(&["bank", "delete", &second_id]);
    let accounts = env.run_json(&["bank", "list"]);
    assert_eq!(accounts[0]["isPrimary"], true);
}

#[test]
fn test_expense_export_by_month() {
    let env = TestEnv::new();
    env.run_ok(&[
        "expense", "add", "--vehicle", "mh12ab1234", "--amount", "4500", "--quantity", "50",
        "--location", "Pune Depot",
    ]);

    let listed = env.run_json(&["expense", "list"]);
    assert_eq!(listed["summary"]["fillings"], 1);
    assert_eq!(listed["summary"]["averagePricePerLiter"], 90.0);

    let out_dir = env.path("exports");
    let out_arg = out_dir.to_string_lossy().to_string();
    env.run_ok(&["expense", "export", "--month", "6", "--year", "2025", "--dir", &out_arg]);

    let csv = std::fs::read_to_string(out_dir.join("diesel_expenses_Jun_2025.csv")).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("MH12AB1234,4500,50,Pune Depot"));
}

#[test]
fn test_driver_rejects_expired_license() {
    let env = TestEnv::new();
    let output = env.run(&[
        "--format", "plain", "driver", "add", "--name", "Suresh", "--phone", "9123456780",
        "--license-number", "MH1420110012345", "--license-expiry", "15062025", "--address",
        "Plot 7, MIDC Road", "--emergency-name", "Meena", "--emergency-phone", "9988776655",
        "--joining-date", "01012024", "--salary", "18000",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("field.licenseExpiryDate="));
}

#[test]
fn test_navigate_path() {
    let env = TestEnv::new();
    let plain = env.run_ok(&[
        "--format", "plain", "navigate", "select-role:customer", "logged-in", "book-tanker",
    ]);
    assert_eq!(plain.lines().last(), Some("screen=book-tanker"));

    let value = env.run_json(&["navigate", "--from", "admin-dashboard", "fleet", "back", "logout"]);
    assert_eq!(value["screen"], "role-selection");
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));

    let bad = env.run(&["navigate", "teleport"]);
    assert_eq!(bad.status.code(), Some(1));
}
