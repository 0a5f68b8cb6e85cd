//! CLI orchestration tests: INI files on disk, overrides, reports and alerts.

mod common;

use common::*;
use macross::adapters::file_config_adapter::FileConfigAdapter;
use macross::cli::{self, RunOverrides};
use macross::domain::error::MacrossError;
use macross::domain::exit::TieBreak;
use macross::domain::indicator::MaType;
use macross::domain::interval::Interval;
use macross::domain::signal::Direction;
use std::fs;
use std::io::Write;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const NOW: i64 = START + 1_000 * HOUR;

const VALID_INI: &str = r#"
[strategy]
ma_fast = 1
ma_slow = 2
ma_type = sma
sl = 0.003
tp = 0.0054
tie_break = take_profit

[data]
symbol = EURUSD
interval = 1h
from = 1704067200
to = 2024-01-02
"#;

fn port() -> MockDataPort {
    MockDataPort::new().with_bars(
        "EURUSD",
        Interval::H1,
        bars_from_closes(&single_cross_closes(20)),
    )
}

mod config_loading {
    use super::*;

    #[test]
    fn loads_strategy_and_request() {
        let file = write_temp_ini(VALID_INI);
        let adapter = cli::load_config(file.path()).unwrap();

        let (strategy, request) =
            cli::build_run_inputs(&adapter, &RunOverrides::default()).unwrap();
        assert_eq!((strategy.ma_fast, strategy.ma_slow), (1, 2));
        assert_eq!(strategy.ma_type, MaType::Sma);
        assert_eq!(strategy.tie_break, TieBreak::TakeProfit);
        assert_eq!(request.symbol, "EURUSD");
        assert_eq!(request.interval, Interval::H1);
        assert_eq!(request.from, Some(START));
        assert_eq!(request.to, Some(START + 24 * HOUR));
    }

    #[test]
    fn overrides_take_precedence() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = RunOverrides {
            symbol: Some("GBPUSD".into()),
            interval: Some("15m".into()),
            from: Some("2024-01-01T06:00:00Z".into()),
            to: Some("1704099600".into()),
            ..RunOverrides::default()
        };

        let (_, request) = cli::build_run_inputs(&adapter, &overrides).unwrap();
        assert_eq!(request.symbol, "GBPUSD");
        assert_eq!(request.interval, Interval::M15);
        assert_eq!(request.from, Some(START + 6 * HOUR));
        assert_eq!(request.to, Some(1_704_099_600));
    }

    #[test]
    fn bad_override_timestamp_rejected() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = RunOverrides {
            from: Some("yesterday".into()),
            ..RunOverrides::default()
        };
        let err = cli::build_run_inputs(&adapter, &overrides).unwrap_err();
        assert!(matches!(err, MacrossError::ConfigInvalid { .. }));
    }

    #[test]
    fn bad_interval_override_rejected() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = RunOverrides {
            interval: Some("2h".into()),
            ..RunOverrides::default()
        };
        let err = cli::build_run_inputs(&adapter, &overrides).unwrap_err();
        assert!(matches!(err, MacrossError::InvalidInterval { .. }));
        assert_eq!(err.exit_status(), 4);
    }

    #[test]
    fn unknown_key_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nfast = 9\n[data]\nsymbol = X\ninterval = 1h\n")
                .unwrap();
        let err = cli::build_run_inputs(&adapter, &RunOverrides::default()).unwrap_err();
        assert!(matches!(err, MacrossError::UnknownConfigKey { .. }));
    }

    #[test]
    fn missing_file_is_config_parse_error() {
        let err = cli::load_config(std::path::Path::new("/nonexistent/macross.ini")).unwrap_err();
        assert!(matches!(err, MacrossError::ConfigParse { .. }));
    }

    #[test]
    fn data_dir_resolution() {
        let adapter = FileConfigAdapter::from_string("[data]\ndata_dir = /srv/bars\n").unwrap();
        assert_eq!(
            cli::resolve_data_dir(&adapter, None),
            std::path::PathBuf::from("/srv/bars")
        );
        let explicit = std::path::PathBuf::from("/tmp/other");
        assert_eq!(cli::resolve_data_dir(&adapter, Some(&explicit)), explicit);

        let empty = FileConfigAdapter::from_string("").unwrap();
        assert_eq!(
            cli::resolve_data_dir(&empty, None),
            std::path::PathBuf::from(".")
        );
    }
}

mod run_command {
    use super::*;

    #[test]
    fn prints_trade_table_and_summary() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let mut out = Vec::new();

        let analysis =
            cli::execute_run(&adapter, &port(), &RunOverrides::default(), NOW, &mut out).unwrap();

        assert_eq!(analysis.trades.len(), 1);
        assert_eq!(analysis.trades[0].exit_index, 15);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("take_profit"));
        assert!(text.contains("trades: 1 (long 1, short 0)"));
    }

    #[test]
    fn writes_reports_from_config_paths() {
        let dir = tempfile::tempdir().unwrap();
        let trades_path = dir.path().join("trades.csv");
        let series_path = dir.path().join("series.csv");
        let ini = format!(
            "{VALID_INI}\n[report]\ntrades_path = {}\nseries_path = {}\n",
            trades_path.display(),
            series_path.display()
        );
        let adapter = FileConfigAdapter::from_string(&ini).unwrap();

        cli::execute_run(
            &adapter,
            &port(),
            &RunOverrides::default(),
            NOW,
            &mut Vec::new(),
        )
        .unwrap();

        let trades = fs::read_to_string(&trades_path).unwrap();
        assert_eq!(trades.lines().count(), 2);
        assert!(trades.lines().nth(1).unwrap().starts_with("1,long,10,"));
        let series = fs::read_to_string(&series_path).unwrap();
        assert_eq!(series.lines().count(), 21);
    }

    #[test]
    fn override_report_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.csv");
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = RunOverrides {
            trades_out: Some(path.clone()),
            ..RunOverrides::default()
        };

        cli::execute_run(&adapter, &port(), &overrides, NOW, &mut Vec::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_range_is_no_data() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = RunOverrides {
            from: Some("2030-01-01".into()),
            to: Some("2030-01-02".into()),
            ..RunOverrides::default()
        };
        let err = cli::execute_run(&adapter, &port(), &overrides, NOW, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, MacrossError::NoData { .. }));
        assert_eq!(err.exit_status(), 5);
    }

    #[test]
    fn reads_bars_from_csv_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut csv = String::from("timestamp,open,high,low,close,volume\n");
        for bar in bars_from_closes(&single_cross_closes(20)) {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                bar.timestamp, bar.open, bar.high, bar.low, bar.close, bar.volume
            ));
        }
        fs::write(dir.path().join("EURUSD_1h.csv"), csv).unwrap();

        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let data_port = macross::adapters::csv_adapter::CsvAdapter::new(dir.path().to_path_buf());
        let analysis = cli::execute_run(
            &adapter,
            &data_port,
            &RunOverrides::default(),
            NOW,
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(analysis.series.len(), 20);
        assert_eq!(analysis.trades.len(), 1);
    }
}

mod alerts_command {
    use super::*;

    const ALERTS_INI: &str = r#"
[strategy]
sl = 0.01
tp = 0.02

[alert:1]
symbol = EURUSD
interval = 1h
ma_fast = 1
ma_slow = 2

[alert:2]
symbol = GBPUSD
interval = 1h
ma_fast = 1
ma_slow = 2

[alert:3]
symbol = USDJPY
interval = 1h
ma_fast = 1
ma_slow = 2
"#;

    #[test]
    fn reports_only_fresh_crossovers() {
        let adapter = FileConfigAdapter::from_string(ALERTS_INI).unwrap();
        let data = MockDataPort::new()
            // crossover on the last bar
            .with_bars("EURUSD", Interval::H1, bars_from_closes(&[100.0, 100.0, 100.0, 99.0]))
            // crossover long ago
            .with_bars("GBPUSD", Interval::H1, bars_from_closes(&single_cross_closes(20)))
            .with_error("USDJPY", Interval::H1, "feed down");

        let now = START + 3 * HOUR;
        let alerts = cli::evaluate_alerts(&adapter, &data, now).unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].symbol, "EURUSD");
        assert_eq!(alerts[0].direction, Direction::Short);
        assert_eq!(alerts[0].price, 99.0);
        assert_eq!(data.requests.borrow().len(), 3);
    }

    #[test]
    fn invalid_alert_section_fails() {
        let adapter =
            FileConfigAdapter::from_string("[alert:1]\nsymbol = EURUSD\ninterval = 7m\n").unwrap();
        let err = cli::evaluate_alerts(&adapter, &MockDataPort::new(), NOW).unwrap_err();
        assert!(matches!(err, MacrossError::InvalidInterval { .. }));
    }
}
