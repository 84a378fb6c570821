//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../tarjama.yml.example");

/// Initialize a new tarjama project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_sources(root)?;

    println!("✓ tarjama initialized in {:?}", root);
    println!("  - Edit tarjama.yml to customize site metadata");
    println!("  - Write pages in src/en/ and src/ar/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("tarjama.yml");
    if config_path.exists() {
        println!("tarjama.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_sources(root: &Path) -> Result<()> {
    let source = root.join("src");
    for dir in [source.join("en"), source.join("ar"), source.join("assets/css")] {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    for (rel, body) in [
        ("en/welcome.md", WELCOME_EN),
        ("ar/welcome.md", WELCOME_AR),
        ("assets/css/site.css", SITE_CSS),
    ] {
        let sample = source.join(rel);
        if !sample.exists() {
            fs::write(&sample, body).with_context(|| format!("Failed to write {:?}", sample))?;
            println!("Created {:?}", sample);
        }
    }

    Ok(())
}

const SITE_CSS: &str = r#"body { max-width: 42rem; margin: 0 auto; font-family: system-ui, sans-serif; }
[dir="rtl"] body { font-family: "Noto Naskh Arabic", serif; }
.toc-list { list-style: none; padding-inline-start: 0; }
.toc-h3 { padding-inline-start: 1rem; }
.toc-h4 { padding-inline-start: 2rem; }
"#;

const WELCOME_EN: &str = r#"---
title: Welcome
description: Quick start guide
date: 2025-01-01
---

## Getting started

Edit `tarjama.yml`, then run `tarjama build`.

## Translations

Arabic pages live in `src/ar/` under the same file name.
"#;

const WELCOME_AR: &str = r#"---
title: أهلاً
description: دليل البدء السريع
date: 2025-01-01
---

## البداية

عدّل ملف `tarjama.yml` ثم شغّل `tarjama build`.
"#;
