// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Consumer example for the `ondie` crate.
//!
//! Validates a raw OnDie signature over a payload file against a leaf-first
//! certificate chain, with CRLs preloaded from disk.

use std::sync::Arc;

use ondie::{InMemoryCrlCache, OnDieSignatureValidator, OnDieValidatorSettings, ValidationResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Read a file to bytes or exit with a clear error.
fn read(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("failed to read {path}: {e}");
        std::process::exit(2);
    })
}

fn print_result(r: &ValidationResult) {
    println!("is_valid: {}", if r.is_valid { "true" } else { "false" });
    println!("validator: {}", r.validator_name);
    if !r.metadata.is_empty() {
        println!("metadata:");
        let mut keys: Vec<_> = r.metadata.keys().collect();
        keys.sort();
        for k in keys {
            if let Some(v) = r.metadata.get(k) {
                println!("  {k}: {v}");
            }
        }
    }
    if !r.failures.is_empty() {
        println!("failures:");
        for f in &r.failures {
            match &f.error_code {
                Some(code) => println!("- [{}] {code}: {}", f.kind, f.message),
                None => println!("- [{}] {}", f.kind, f.message),
            }
        }
    }
}

fn get_arg_value(args: &[String], name: &str) -> Option<String> {
    get_arg_values(args, name).into_iter().next()
}

/// All values of a repeatable option, in order.
fn get_arg_values(args: &[String], name: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < args.len() {
        if args[i] == name {
            if let Some(v) = args.get(i + 1) {
                out.push(v.clone());
            }
            i += 1;
        }
        i += 1;
    }
    out
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn usage_and_exit(exe: &str) -> ! {
    eprintln!("Usage:");
    eprintln!(
        "  {exe} --cert <der> [--cert <der> ...] --payload <file> --signature <file> [--crl <name>=<der> ...] [--no-revocation]"
    );
    eprintln!("Certificates are given leaf first. Set RUST_LOG=debug for pipeline logs.");
    std::process::exit(2);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let exe = args.first().map(|s| s.as_str()).unwrap_or("ondie_hello_world");

    let cert_paths = get_arg_values(&args, "--cert");
    let payload_path = get_arg_value(&args, "--payload").unwrap_or_default();
    let signature_path = get_arg_value(&args, "--signature").unwrap_or_default();
    if cert_paths.is_empty() || payload_path.is_empty() || signature_path.is_empty() {
        usage_and_exit(exe);
    }

    let mut cache = InMemoryCrlCache::new();
    for entry in get_arg_values(&args, "--crl") {
        let Some((name, path)) = entry.split_once('=') else {
            eprintln!("--crl expects <name>=<der>, got {entry}");
            std::process::exit(2);
        };
        cache.insert(name, read(path));
    }

    let settings = OnDieValidatorSettings::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });
    let settings = if has_flag(&args, "--no-revocation") {
        settings.without_revocation_checks()
    } else {
        settings
    };

    let chain: Vec<Vec<u8>> = cert_paths.iter().map(|p| read(p)).collect();
    let payload = read(&payload_path);
    let signature = read(&signature_path);

    info!(
        certificates = chain.len(),
        crls = cache.len(),
        check_revocations = settings.check_revocations(),
        "validating OnDie signature"
    );

    let validator = OnDieSignatureValidator::new(Arc::new(cache), settings);
    let r = validator.validate_detailed(&chain, &payload, &signature);
    print_result(&r);
    std::process::exit(if r.is_valid { 0 } else { 3 });
}
