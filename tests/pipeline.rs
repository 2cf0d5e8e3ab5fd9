use std::path::Path;

use sales_cleaner::config::{CleanerConfig, Overrides};
use sales_cleaner::data::missing::DualClassPolicy;
use sales_cleaner::error::LoadError;

const RAW: &str = "\
Order ID, Product Name ,Unit Price ($),Quantity,Total-Cost,QUANTITY,
1,Widget,2.50,4,10.0,4,x
2,Gadget,,2,bad,2,
3,Gizmo,1.25,,5.0,3,
4,Sprocket,3.00,0,0.0,0,
";

fn write(path: &Path, text: &str) {
    std::fs::write(path, text).unwrap();
}

#[test]
fn cleans_a_messy_export_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw/sales.csv");
    std::fs::create_dir_all(input.parent().unwrap()).unwrap();
    write(&input, RAW);

    let config = CleanerConfig::resolve(
        None,
        Overrides {
            input: Some(input),
            output: Some(dir.path().join("processed/clean.csv")),
            ..Default::default()
        },
    )
    .unwrap();
    let summary = sales_cleaner::run(&config).unwrap();

    // "Unit Price ($)" matches both keyword sets: filled first, so nothing is
    // dropped on its account; only the blank "Quantity" in order 3 drops a row.
    assert_eq!(summary.rows_in, 4);
    assert_eq!(summary.rows_out, 3);
    assert_eq!(summary.missing.rows_dropped, 1);
    assert_eq!(summary.missing.cells_filled, 2);

    let written = std::fs::read_to_string(&config.output).unwrap();
    assert_eq!(
        written,
        "order_id,product_name,unit_price,quantity,total_cost,quantity_v1,unnamed\n\
         1,Widget,2.5,4.0,10.0,4.0,x\n\
         2,Gadget,0.0,2.0,0.0,2.0,\n\
         4,Sprocket,3.0,0.0,0.0,0.0,\n"
    );
}

#[test]
fn positive_only_applies_after_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    write(&input, "Price,Quantity\n1.0,2\n,3\n-1,1\n4,0\n");

    let config = CleanerConfig {
        input,
        output: dir.path().join("out.csv"),
        positive_only: true,
        ..Default::default()
    };
    let summary = sales_cleaner::run(&config).unwrap();

    assert_eq!(summary.rows_filtered, Some(2));
    let written = std::fs::read_to_string(&config.output).unwrap();
    assert_eq!(written, "price,quantity\n1.0,2.0\n0.0,3.0\n");
}

#[test]
fn config_file_policy_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    write(&input, "Unit Price,Region\n2,a\n,b\n3,c\n");
    let config_path = dir.path().join("cleaner.toml");
    write(
        &config_path,
        &format!(
            "input = {:?}\noutput = {:?}\ndual_class = \"quantity-only\"\n",
            input,
            dir.path().join("out.csv")
        ),
    );

    let config = CleanerConfig::resolve(Some(&config_path), Overrides::default()).unwrap();
    assert_eq!(config.dual_class, DualClassPolicy::QuantityOnly);

    let summary = sales_cleaner::run(&config).unwrap();
    assert_eq!(summary.rows_out, 2);
    assert!(summary.missing.price_columns.is_empty());
}

#[test]
fn missing_input_is_file_not_found_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = CleanerConfig {
        input: dir.path().join("nope.csv"),
        output: dir.path().join("processed/clean.csv"),
        ..Default::default()
    };

    let err = sales_cleaner::run(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::FileNotFound(_))
    ));
    assert!(!dir.path().join("processed").exists());
}

#[test]
fn binary_reports_progress_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    let output = dir.path().join("clean.csv");
    write(&input, "Price,Quantity\n1.5,2\n");

    let out = std::process::Command::new(env!("CARGO_BIN_EXE_sales-cleaner"))
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .env("RUST_LOG", "info")
        .env_remove("SALES_CLEANER_CONFIG")
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Data loaded successfully"), "stdout was {stdout:?}");
    assert!(stdout.contains("Cleaned data saved"), "stdout was {stdout:?}");
    assert!(output.exists());
}

#[test]
fn binary_exits_nonzero_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let out = std::process::Command::new(env!("CARGO_BIN_EXE_sales-cleaner"))
        .arg("--input")
        .arg(dir.path().join("nope.csv"))
        .arg("--output")
        .arg(dir.path().join("clean.csv"))
        .env("RUST_LOG", "info")
        .env_remove("SALES_CLEANER_CONFIG")
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("File not found"), "stdout was {stdout:?}");
    assert!(!dir.path().join("clean.csv").exists());
}
