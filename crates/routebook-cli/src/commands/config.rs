use routebook_core::RemoteConfig;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::config_profiles::{
    default_config_path, is_http_url, normalize_text_option, CliProfile, CliProfilesConfig,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub config_path: String,
    pub profile: String,
    pub supabase_url: Option<String>,
    pub supabase_anon_key_set: bool,
    pub remote_enabled: bool,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            supabase_url,
            supabase_anon_key,
            no_activate,
        } => run_config_init(global_profile, supabase_url, supabase_anon_key, no_activate),
        ConfigCommands::Show { json } => run_config_show(global_profile, json),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_config_init(
    profile_name: Option<&str>,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing_profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged = merge_profile(
        &existing_profile,
        normalize_text_option(supabase_url),
        normalize_text_option(supabase_anon_key),
        &RemoteConfig::from_env(),
    );
    validate_profile_urls(&merged)?;
    *config.profile_mut_or_default(&profile_name) = merged.clone();

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let missing_fields = missing_profile_fields(&merged);
    if missing_fields.is_empty() {
        println!("Remote mirror for profile '{profile_name}' is ready.");
    } else {
        println!(
            "Profile '{}' is missing: {} (running local-only)",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

pub fn run_config_show(profile_name: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let effective = RemoteConfig::from_env().or(profile.remote_config());

    let report = ConfigReport {
        config_path: default_config_path()
            .map_err(CliError::Config)?
            .display()
            .to_string(),
        profile: profile_name,
        supabase_url: effective.url.clone(),
        supabase_anon_key_set: effective.anon_key.is_some(),
        remote_enabled: effective.rest_url().is_some() && effective.is_configured(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("config:    {}", report.config_path);
        println!("profile:   {}", report.profile);
        println!(
            "url:       {}",
            report.supabase_url.as_deref().unwrap_or("(not set)")
        );
        println!(
            "anon key:  {}",
            if report.supabase_anon_key_set { "set" } else { "(not set)" }
        );
        println!(
            "mode:      {}",
            if report.remote_enabled { "local + remote mirror" } else { "local-only" }
        );
    }

    Ok(())
}

/// Explicit flags win, then environment variables, then what the profile
/// already holds
pub fn merge_profile(
    existing: &CliProfile,
    explicit_url: Option<String>,
    explicit_anon_key: Option<String>,
    from_env: &RemoteConfig,
) -> CliProfile {
    CliProfile {
        supabase_url: explicit_url
            .or_else(|| normalize_text_option(from_env.url.clone()))
            .or_else(|| existing.supabase_url()),
        supabase_anon_key: explicit_anon_key
            .or_else(|| normalize_text_option(from_env.anon_key.clone()))
            .or_else(|| existing.supabase_anon_key()),
    }
}

pub fn missing_profile_fields(profile: &CliProfile) -> Vec<&'static str> {
    let mut missing_fields = Vec::new();
    if profile.supabase_url().is_none() {
        missing_fields.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing_fields.push("supabase_anon_key");
    }
    missing_fields
}

pub fn validate_profile_urls(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}
