use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize structured logging
///
/// `TFIDF_MATRIX_LOG` or `RUST_LOG` override the level chosen here.
/// Logs go to stderr so table output on stdout stays clean.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level.to_string(),
        (true, None) => "debug".to_string(),
        (false, None) => "warn".to_string(),
    };

    let filter = EnvFilter::try_from_env("TFIDF_MATRIX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level
            } else {
                format!("tf_idf_matrix={}", level)
            })
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
