use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use pretty_assertions::assert_eq;
use routebook_core::dashboard::DashboardSummary;
use routebook_core::{Customer, VisitStatus};

use crate::cli::{CompletionShell, CustomerFields, FilterArgs, StatusArg};
use crate::commands::add::build_customer;
use crate::commands::common::{
    apply_customer_fields, customer_filter, format_customer_lines, format_location,
    format_region_lines, format_timestamp, has_customer_fields, list_customers,
    normalize_customer_identifier, resolve_customer, resolve_region, truncate, AppContext,
};
use crate::commands::completions::render_completions;
use crate::commands::config::{merge_profile, missing_profile_fields, validate_profile_urls};
use crate::commands::dashboard::render_dashboard;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::mark::run_mark;
use crate::commands::reset::run_reset;
use crate::config_profiles::CliProfile;
use crate::error::CliError;

#[test]
fn normalize_customer_identifier_rejects_empty() {
    assert!(matches!(
        normalize_customer_identifier("  "),
        Err(CliError::EmptyCustomerId)
    ));
    assert_eq!(normalize_customer_identifier(" abc ").unwrap(), "abc");
}

#[test]
fn truncate_adds_ellipsis() {
    assert_eq!(truncate("Blue   Market", 20), "Blue Market");
    assert_eq!(truncate("A very long shop name indeed", 10), "A very ...");
}

#[test]
fn format_timestamp_returns_utc_label() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
}

#[test]
fn format_location_joins_region_parts() {
    let mut customer = Customer::new("Shop", "1");
    assert_eq!(format_location(&customer), "-");
    customer.main_region = "دهوك".to_string();
    assert_eq!(format_location(&customer), "دهوك");
    customer.sub_region = "مالطا".to_string();
    assert_eq!(format_location(&customer), "دهوك / مالطا");
}

#[test]
fn customer_lines_show_status_label_and_phone() {
    let customer = Customer {
        visit_status: VisitStatus::Postponed,
        ..Customer::new("Blue Shop", "0750 123")
    };
    let lines = format_customer_lines(&[customer]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("مؤجل"));
    assert!(lines[0].contains("Blue Shop"));
    assert!(lines[0].contains("0750 123"));
}

#[test]
fn region_lines_number_subregions() {
    let region = routebook_core::Region::new("دهوك")
        .with_subregion("مالطا")
        .with_subregion("ماسيكي");
    let lines = format_region_lines(&[region]);
    assert!(lines[0].contains("دهوك (2 sub-regions)"));
    assert_eq!(lines[1], "    [0] مالطا");
    assert_eq!(lines[2], "    [1] ماسيكي");
}

#[test]
fn filter_args_map_to_customer_filter() {
    let filter = customer_filter(&FilterArgs {
        region: Some(" دهوك ".to_string()),
        sub_region: Some("  ".to_string()),
        status: Some(StatusArg::Done),
        query: None,
    });
    assert_eq!(filter.main_region.as_deref(), Some("دهوك"));
    assert_eq!(filter.sub_region, None);
    assert_eq!(filter.status, Some(VisitStatus::Done));
}

#[test]
fn build_customer_derives_whatsapp_link_and_validates() {
    let customer = build_customer(
        &CustomerFields {
            shop: Some(" Blue Shop ".to_string()),
            phone: Some("+964 750 123".to_string()),
            ..CustomerFields::default()
        },
        Some(StatusArg::Postponed),
    )
    .unwrap();
    assert_eq!(customer.shop_name, "Blue Shop");
    assert_eq!(customer.whatsapp_link, "https://wa.me/964750123");
    assert_eq!(customer.visit_status, VisitStatus::Postponed);

    let missing_phone = build_customer(
        &CustomerFields {
            shop: Some("Shop".to_string()),
            ..CustomerFields::default()
        },
        None,
    );
    assert!(matches!(
        missing_phone,
        Err(CliError::Core(routebook_core::Error::InvalidInput(_)))
    ));
}

#[test]
fn explicit_whatsapp_link_wins_over_phone() {
    let mut customer = Customer::new("Shop", "111");
    let changed = apply_customer_fields(
        &mut customer,
        &CustomerFields {
            phone: Some("222".to_string()),
            whatsapp_link: Some("https://wa.me/999".to_string()),
            ..CustomerFields::default()
        },
    );
    assert!(changed);
    assert_eq!(customer.phone, "222");
    assert_eq!(customer.whatsapp_link, "https://wa.me/999");
}

#[test]
fn unchanged_fields_report_no_change() {
    let mut customer = Customer::new("Shop", "111");
    let fields = CustomerFields {
        shop: Some("Shop".to_string()),
        ..CustomerFields::default()
    };
    assert!(has_customer_fields(&fields));
    assert!(!has_customer_fields(&CustomerFields::default()));
    assert!(!apply_customer_fields(&mut customer, &fields));
}

#[test]
fn merge_profile_prefers_flags_then_env_then_existing() {
    let existing = CliProfile {
        supabase_url: Some("https://old.supabase.co".to_string()),
        supabase_anon_key: Some("old-key".to_string()),
    };
    let env = routebook_core::RemoteConfig {
        url: None,
        anon_key: Some("env-key".to_string()),
    };

    let merged = merge_profile(
        &existing,
        Some("https://new.supabase.co".to_string()),
        None,
        &env,
    );
    assert_eq!(merged.supabase_url.as_deref(), Some("https://new.supabase.co"));
    assert_eq!(merged.supabase_anon_key.as_deref(), Some("env-key"));
    assert!(missing_profile_fields(&merged).is_empty());
    assert_eq!(
        missing_profile_fields(&CliProfile::default()),
        vec!["supabase_url", "supabase_anon_key"]
    );
}

#[test]
fn profile_urls_require_http_scheme() {
    let profile = CliProfile {
        supabase_url: Some("project.supabase.co".to_string()),
        supabase_anon_key: None,
    };
    assert!(matches!(
        validate_profile_urls(&profile),
        Err(CliError::Config(_))
    ));
    assert!(validate_profile_urls(&CliProfile::default()).is_ok());
}

#[test]
fn dashboard_rendering_includes_counts_and_regions() {
    let customers = vec![
        Customer {
            main_region: "دهوك".to_string(),
            visit_status: VisitStatus::Done,
            ..Customer::new("A", "1")
        },
        Customer::new("B", "2"),
    ];
    let rendered = render_dashboard(&DashboardSummary::from_customers(&customers));
    assert!(rendered.starts_with("Customers: 2  visited: 1 (50%)"));
    assert!(rendered.contains("By region"));
    assert!(rendered.contains("(none)"));
}

#[test]
fn completions_mention_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("routebook"));
}

#[tokio::test(flavor = "current_thread")]
async fn resolve_customer_supports_exact_and_prefix_id() {
    let ctx = AppContext::local(unique_test_db_path());
    let service = ctx.open_service().await.unwrap();
    let customer = Customer::new("Shop", "1");
    service.save_customer(&customer).await.unwrap();

    let exact = resolve_customer(customer.id.as_str(), &service).await.unwrap();
    assert_eq!(exact.id, customer.id);

    let prefix = customer.id.as_str().chars().take(20).collect::<String>();
    let by_prefix = resolve_customer(&prefix, &service).await.unwrap();
    assert_eq!(by_prefix.id, customer.id);

    assert!(matches!(
        resolve_customer("zzzz", &service).await,
        Err(CliError::CustomerNotFound(_))
    ));

    cleanup_db_files(&ctx.db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn resolve_customer_rejects_ambiguous_prefix() {
    let ctx = AppContext::local(unique_test_db_path());
    let service = ctx.open_service().await.unwrap();
    for shop in ["A", "B"] {
        service.save_customer(&Customer::new(shop, "1")).await.unwrap();
    }

    assert!(matches!(
        resolve_customer("", &service).await,
        Err(CliError::AmbiguousCustomerId(_))
    ));

    cleanup_db_files(&ctx.db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn resolve_region_accepts_id_or_name() {
    let ctx = AppContext::local(unique_test_db_path());
    let service = ctx.open_service().await.unwrap();

    assert_eq!(resolve_region("1", &service).await.unwrap().name, "دهوك");
    assert_eq!(resolve_region(" سيميل ", &service).await.unwrap().id.as_str(), "3");
    assert!(matches!(
        resolve_region("Atlantis", &service).await,
        Err(CliError::RegionNotFound(_))
    ));

    cleanup_db_files(&ctx.db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn mark_reset_and_delete_update_the_store() {
    let ctx = AppContext::local(unique_test_db_path());
    let customer = Customer::new("Shop", "1");
    {
        let service = ctx.open_service().await.unwrap();
        service.save_customer(&customer).await.unwrap();
    }

    run_mark(customer.id.as_str(), StatusArg::Done, &ctx).await.unwrap();
    let done = list_customers(&customer_filter(&FilterArgs::default()), &ctx)
        .await
        .unwrap();
    assert_eq!(done[0].visit_status, VisitStatus::Done);

    assert!(matches!(
        run_reset(false, &ctx).await,
        Err(CliError::ConfirmationRequired)
    ));
    run_reset(true, &ctx).await.unwrap();
    let reset = list_customers(&customer_filter(&FilterArgs::default()), &ctx)
        .await
        .unwrap();
    assert_eq!(reset[0].visit_status, VisitStatus::NotDone);

    run_delete(customer.id.as_str(), &ctx).await.unwrap();
    let remaining = list_customers(&customer_filter(&FilterArgs::default()), &ctx)
        .await
        .unwrap();
    assert!(remaining.is_empty());

    cleanup_db_files(&ctx.db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn import_then_export_round_trips_customers() {
    let ctx = AppContext::local(unique_test_db_path());
    let csv_path = ctx.db_path.with_extension("csv");
    std::fs::write(
        &csv_path,
        "المنطقة,المنطقة الفرعية,اسم المحل,المدير,الهاتف\n\
         دهوك,مالطا,Blue Shop,Ali,0750,,,تمت\n\
         too,short\n\
         سيميل,,Red Shop,,0751,,,مؤجل\n",
    )
    .unwrap();

    assert!(matches!(
        run_export(&FilterArgs::default(), crate::cli::ExportFormat::Csv, None, true, &ctx).await,
        Err(CliError::NothingToExport)
    ));

    let imported = run_import(&csv_path, &ctx).await.unwrap();
    assert_eq!(imported, 2);

    let done_only = FilterArgs {
        status: Some(StatusArg::Done),
        ..FilterArgs::default()
    };
    let export_path = ctx.db_path.with_extension("export.csv");
    run_export(
        &done_only,
        crate::cli::ExportFormat::Csv,
        Some(export_path.as_path()),
        false,
        &ctx,
    )
    .await
    .unwrap();

    let exported = std::fs::read_to_string(&export_path).unwrap();
    let lines = exported.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('\u{feff}'));
    assert_eq!(
        lines[1],
        "\"دهوك\",\"مالطا\",\"Blue Shop\",\"Ali\",\"0750\",\"\",\"\",\"تمت\""
    );

    let _ = std::fs::remove_file(csv_path);
    let _ = std::fs::remove_file(export_path);
    cleanup_db_files(&ctx.db_path);
}

#[tokio::test(flavor = "current_thread")]
async fn import_rejects_files_without_rows() {
    let ctx = AppContext::local(unique_test_db_path());
    let csv_path = ctx.db_path.with_extension("csv");
    std::fs::write(&csv_path, "manager_name\nonly,two\n").unwrap();

    assert!(matches!(
        run_import(&csv_path, &ctx).await,
        Err(CliError::EmptyImport(_))
    ));

    let _ = std::fs::remove_file(csv_path);
}

fn unique_test_db_path() -> PathBuf {
    static NEXT_TEST_DB_ID: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let sequence = NEXT_TEST_DB_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("routebook-cli-test-{timestamp}-{sequence}.db"))
}

fn cleanup_db_files(path: &PathBuf) {
    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
}
