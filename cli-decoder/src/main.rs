use clap::{Parser, ValueEnum};
use spayd::ShortPaymentDescriptor;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "cli_decoder",
    version,
    about = "Разбирает платёжную строку SPD (QR Platba) и печатает её поля.",
    long_about = None,
)]
struct Args {
    /// Строка SPD
    #[arg(long, conflicts_with = "input")]
    spayd: Option<String>,

    /// Файл со строкой SPD (если не задан ни он, ни --spayd, читается stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
}

/// Поддерживаемые форматы вывода
#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn read_input(args: &Args) -> io::Result<String> {
    if let Some(spayd) = &args.spayd {
        return Ok(spayd.clone());
    }

    match &args.input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_field<T: std::fmt::Display>(name: &str, value: Option<T>) {
    if let Some(value) = value {
        println!("{name:<36} {value}");
    }
}

fn print_text(spd: &ShortPaymentDescriptor) {
    print_field("counterparty", Some(&spd.counterparty));
    for alt in &spd.alternative_counterparties {
        print_field("alternative counterparty", Some(alt));
    }
    if let Ok(account) = spd.counterparty.czech_account() {
        print_field("czech account", Some(account));
    }
    print_field("amount", spd.amount);
    print_field("currency", spd.currency.as_deref());
    print_field("creditor reference", spd.creditor_reference.as_deref());
    print_field("creditor name", spd.creditor_name.as_deref());

    // при FRQ поля DT и MSG описывают постоянное поручение
    let (date_label, message_label) = if spd.is_standing_order() {
        ("first payment date", "standing order name")
    } else {
        ("due date", "message")
    };
    print_field(date_label, spd.due_date);
    print_field(message_label, spd.message.as_deref());

    let payment_type = spd.payment_type.to_string();
    print_field("payment type", (!payment_type.is_empty()).then_some(payment_type));
    let notification_type = spd.notification_type.to_string();
    print_field("notification type", (!notification_type.is_empty()).then_some(notification_type));
    print_field("notification address", spd.notification_address.as_deref());
    let frequency = spd.payment_frequency.to_string();
    print_field("payment frequency", (!frequency.is_empty()).then_some(frequency));
    print_field("standing order expiry date", spd.standing_order_expiry_date);
    print_field("keep executing after death", spd.keep_executing_after_death);
    print_field("retry days", spd.retry_count_limit);
    print_field("variable symbol", spd.variable_symbol.as_deref());
    print_field("specific symbol", spd.specific_symbol.as_deref());
    print_field("constant symbol", spd.constant_symbol.as_deref());
    print_field("payer payment id", spd.payer_internal_payment_identifier.as_deref());
    print_field("url", spd.url.as_deref());
    print_field("note to self", spd.note_to_self.as_deref());
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log::debug!("{args:?}");

    let input = read_input(&args)
        .map_err(|err| format!("failed to read input: {err}"))?;
    let spd = ShortPaymentDescriptor::parse(input.trim())?;

    match args.output_format {
        OutputFormat::Text => print_text(&spd),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&spd)?),
    }

    Ok(())
}
