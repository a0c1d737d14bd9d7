use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(json: bool, data: T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Error envelope mirrored by every command: stable machine code plus the
/// human message.
pub fn print_err(json: bool, code: &str, message: &str) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error[{}]: {}", code, message),
        }
    } else {
        eprintln!("error[{}]: {}", code, message);
    }
}

/// Text rendering of the aggregate percentage; the empty-report sentinel
/// must stay distinguishable from an actual 0%.
pub fn percentage_label(percentage: Option<f64>) -> String {
    match percentage {
        Some(v) => format!("{:.1}%", v),
        None => "no data".to_string(),
    }
}
