//! Command-line wrapper around the fetcher and parser: queries one server,
//! prints a formatted metrics table, and optionally exports the report as
//! JSON.

use apache_status::{
    ConnectionConfig,
    HttpFetcher,
    Scheme,
    StatusFetcher,
    StatusReport,
};
use clap::Parser;
use color_eyre::Result;
use comfy_table::{
    presets,
    Attribute,
    Cell,
    Color,
    ContentArrangement,
    Table,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "apache-status")]
#[command(about = "Apache mod_status report gatherer")]
#[command(version)]
struct Cli {
    /// Hostname of the server to query
    #[arg(env = "APACHE_STATUS_HOST", required_unless_present = "url", conflicts_with = "url")]
    hostname: Option<String>,

    /// Full server URL instead of hostname/port/scheme (e.g. https://web01.example.com:8443)
    #[arg(long, env = "APACHE_STATUS_URL")]
    url: Option<String>,

    /// Port to connect to (defaults to 80 for http, 443 for https)
    #[arg(long)]
    port: Option<u16>,

    /// Scheme to connect with
    #[arg(long, value_enum, default_value_t = Scheme::Http)]
    scheme: Scheme,

    /// Skip TLS certificate verification (for legacy hosts without valid certificates)
    #[arg(long)]
    insecure: bool,

    /// Request timeout (e.g. "10s", "1m")
    #[arg(long, default_value = "10s")]
    timeout: String,

    /// Output file path (optional, if provided additionally exports the report as JSON)
    #[arg(long)]
    output_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("apache_status={log_level}"))
        .init();

    color_eyre::install()?;

    let mut config = match &cli.url {
        Some(url) => ConnectionConfig::from_url(url)?,
        None => {
            let mut config = ConnectionConfig::new(cli.hostname.clone().unwrap_or_default());
            config.scheme = cli.scheme;
            config.port = cli.scheme.default_port();
            config
        }
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.accept_invalid_certs = cli.insecure;
    config.timeout = humantime::parse_duration(&cli.timeout)
        .map_err(|e| eyre::eyre!("Invalid timeout '{}': {}", cli.timeout, e))?;

    info!("Querying {}", config.status_url());

    let fetcher = HttpFetcher::new(config)?;
    let report = StatusReport::parse(fetcher.fetch()?);

    println!("{}", format_report(&report));

    if let Some(output_file) = &cli.output_file {
        let json_string = serde_json::to_string_pretty(&report)?;
        std::fs::write(output_file, json_string)?;
        info!("Report exported to {}", output_file);
    }

    Ok(())
}

fn format_report(report: &StatusReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("SERVER STATUS")
            .add_attribute(Attribute::Bold)
            .fg(Color::Cyan)]);

    table.add_row(vec![
        Cell::new("Utilization").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", report.utilization() * 100.0))
            .fg(utilization_color(report.utilization())),
    ]);

    table.add_row(vec![
        Cell::new("Workers").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} busy / {} idle",
            report.busy_workers(),
            report.idle_workers()
        )),
    ]);

    table.add_row(vec![
        Cell::new("Total Accesses").add_attribute(Attribute::Bold),
        Cell::new(report.total_accesses().to_string()),
    ]);

    table.add_row(vec![
        Cell::new("Total Traffic").add_attribute(Attribute::Bold),
        Cell::new(format!("{} kB", report.total_kbytes())),
    ]);

    table.add_row(vec![
        Cell::new("CPU Load").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", report.cpu_load())),
    ]);

    table.add_row(vec![
        Cell::new("Uptime").add_attribute(Attribute::Bold),
        Cell::new(humantime::format_duration(std::time::Duration::from_secs(report.uptime_seconds())).to_string()),
    ]);

    table.add_row(vec![
        Cell::new("Requests/sec").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.3}", report.requests_per_second())),
    ]);

    table.add_row(vec![
        Cell::new("Bytes/sec").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}", report.bytes_per_second())),
    ]);

    table.add_row(vec![
        Cell::new("Bytes/req").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}", report.bytes_per_request())),
    ]);

    table.add_row(vec![
        Cell::new("Scoreboard").add_attribute(Attribute::Bold),
        Cell::new(report.scoreboard().to_string()),
    ]);

    table.to_string()
}

fn utilization_color(utilization: f64) -> Color {
    if utilization < 0.5 {
        Color::Green
    } else if utilization < 0.8 {
        Color::Yellow
    } else {
        Color::Red
    }
}
