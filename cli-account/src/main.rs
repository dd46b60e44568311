use clap::Parser;
use spayd::{CzechBankAccount, ParseError};
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "cli_account",
    version,
    about = "Нормализует чешский номер счёта (prefix-number/bank или IBAN).",
    long_about = None,
)]
struct Args {
    /// Номер счёта: `19-2000145399/0800` или `CZ6508000000192000145399`
    account: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// IBAN начинается с двухбуквенного кода страны
fn looks_like_iban(s: &str) -> bool {
    let mut chars = s.trim_start().chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_ascii_alphabetic() && b.is_ascii_alphabetic()
    )
}

fn run() -> Result<(), ParseError> {
    let args = Args::parse();

    let account = if looks_like_iban(&args.account) {
        log::debug!("treating {} as IBAN", args.account);
        CzechBankAccount::from_iban(&args.account)?
    } else {
        args.account.parse::<CzechBankAccount>()?
    };

    println!("account  {account}");
    println!("prefix   {}", account.prefix().unwrap_or(""));
    println!("number   {}", account.account_number());
    println!("bank     {}", account.bank_code());
    println!("iban     {}", account.to_iban());

    Ok(())
}
