use clap::Parser;
use gesture_resolver::config::OutputFormat;
use gesture_resolver::utils::error::ErrorSeverity;
use gesture_resolver::utils::{logger, validation::Validate};
use gesture_resolver::{CliConfig, ConfigResolver, ConflictReport, ResolvedConfig, ResolverError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolver_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting gesture-resolver");
    tracing::debug!("Resolver config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let context = config.context();
    let result = match config.build_store() {
        Ok(store) => {
            let resolver = ConfigResolver::new(store);
            let (username, application, os) = (
                context.username.as_deref(),
                context.application.as_deref(),
                context.os.as_deref(),
            );

            if cli.explain {
                resolver
                    .explain(username, application, os)
                    .await
                    .and_then(|report| print_report(&report, cli.format))
            } else {
                resolver
                    .resolve_configuration(username, application, os)
                    .await
                    .and_then(|resolved| print_config(&resolved, cli.format))
            }
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

fn print_config(config: &ResolvedConfig, format: OutputFormat) -> Result<(), ResolverError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            println!(
                "user={} application={} os={}",
                config.username.as_deref().unwrap_or("-"),
                config.application_code.as_deref().unwrap_or("-"),
                config.os
            );
            if config.is_empty() {
                println!("(no gesture mappings)");
            }
            for mapping in &config.mappings {
                println!(
                    "{:<20} {:<10} {:<24} {}",
                    mapping.gesture_code,
                    mapping.action.action_type,
                    mapping.action.value,
                    mapping.action.os_scope
                );
            }
        }
    }
    Ok(())
}

fn print_report(report: &ConflictReport, format: OutputFormat) -> Result<(), ResolverError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            if !report.has_conflicts() {
                println!("✅ No competing bindings ({} candidates)", report.total_candidates());
            }
            for conflict in &report.conflicts {
                println!(
                    "{}: {} ({}, priority {})",
                    conflict.gesture_code,
                    conflict.winner.action.value,
                    conflict.winner.action.os_scope,
                    conflict.winner.priority
                );
                for shadowed in &conflict.shadowed {
                    println!(
                        "  shadowed: {} ({}, priority {})",
                        shadowed.action.value, shadowed.action.os_scope, shadowed.priority
                    );
                }
            }
        }
    }
    Ok(())
}

fn exit_with(e: ResolverError) -> ! {
    tracing::error!(
        "❌ Resolution failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
