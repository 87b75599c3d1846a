use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct SiteFile {
    profile: ProfileSection,
    theme: ThemeSection,
    #[serde(default)]
    nav: Vec<NavEntry>,
    #[serde(default)]
    social: Vec<SocialEntry>,
}

#[derive(Deserialize)]
struct ProfileSection {
    name: String,
    title: String,
    brand_href: Option<String>,
}

#[derive(Deserialize)]
struct ThemeSection {
    storage_key: String,
    explicit_key: String,
}

#[derive(Deserialize)]
struct NavEntry {
    label: String,
    href: String,
}

#[derive(Deserialize)]
struct SocialEntry {
    label: String,
    short: String,
    href: String,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=SITE_CONFIG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let config_path = resolve_config_path(workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
        panic!(
            "failed to read site config at {}: {err}",
            config_path.display()
        )
    });

    let site: SiteFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse site config at {}: {err}",
            config_path.display()
        )
    });

    validate(&site, &config_path);

    let brand_href = site.profile.brand_href.as_deref().unwrap_or("#top");

    let mut output = String::new();
    writeln!(&mut output, "pub const NAV_ITEMS: &[NavItem] = &[").unwrap();
    for entry in &site.nav {
        writeln!(
            &mut output,
            "    NavItem {{ label: {}, href: {} }},",
            rust_string(&entry.label),
            rust_string(&entry.href)
        )
        .unwrap();
    }
    writeln!(&mut output, "];").unwrap();
    writeln!(&mut output).unwrap();

    writeln!(&mut output, "pub const SOCIAL_LINKS: &[SocialLink] = &[").unwrap();
    for entry in &site.social {
        writeln!(
            &mut output,
            "    SocialLink {{ label: {}, short: {}, href: {} }},",
            rust_string(&entry.label),
            rust_string(&entry.short),
            rust_string(&entry.href)
        )
        .unwrap();
    }
    writeln!(&mut output, "];").unwrap();
    writeln!(&mut output).unwrap();

    writeln!(&mut output, "pub const SITE_CONFIG: SiteConfig = SiteConfig {{").unwrap();
    writeln!(&mut output, "    name: {},", rust_string(&site.profile.name)).unwrap();
    writeln!(&mut output, "    title: {},", rust_string(&site.profile.title)).unwrap();
    writeln!(&mut output, "    brand_href: {},", rust_string(brand_href)).unwrap();
    writeln!(
        &mut output,
        "    theme_storage_key: {},",
        rust_string(&site.theme.storage_key)
    )
    .unwrap();
    writeln!(
        &mut output,
        "    theme_explicit_key: {},",
        rust_string(&site.theme.explicit_key)
    )
    .unwrap();
    writeln!(&mut output, "    nav_items: NAV_ITEMS,").unwrap();
    writeln!(&mut output, "    social_links: SOCIAL_LINKS,").unwrap();
    writeln!(&mut output, "}};").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("site_config.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("SITE_CONFIG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("site.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn validate(site: &SiteFile, config_path: &Path) {
    if site.profile.name.trim().is_empty() {
        panic!("profile name cannot be empty in {}", config_path.display());
    }
    if site.profile.title.trim().is_empty() {
        panic!("profile title cannot be empty in {}", config_path.display());
    }

    let storage_key = site.theme.storage_key.trim();
    let explicit_key = site.theme.explicit_key.trim();
    if storage_key.is_empty() || explicit_key.is_empty() {
        panic!("theme storage keys cannot be empty in {}", config_path.display());
    }
    if storage_key == explicit_key {
        panic!(
            "theme storage_key and explicit_key must differ in {}",
            config_path.display()
        );
    }

    let mut hrefs = HashSet::new();
    for entry in &site.nav {
        if entry.label.trim().is_empty() {
            panic!("nav label cannot be empty in {}", config_path.display());
        }
        if !entry.href.starts_with('#') {
            panic!(
                "nav '{}' href must be an in-page anchor in {}",
                entry.label,
                config_path.display()
            );
        }
        if !hrefs.insert(entry.href.clone()) {
            panic!(
                "duplicate nav href '{}' in {}",
                entry.href,
                config_path.display()
            );
        }
    }

    for entry in &site.social {
        if entry.label.trim().is_empty() || entry.short.trim().is_empty() {
            panic!("social link labels cannot be empty in {}", config_path.display());
        }
        if !entry.href.starts_with("https://") {
            panic!(
                "social link '{}' must use https in {}",
                entry.label,
                config_path.display()
            );
        }
    }
}
