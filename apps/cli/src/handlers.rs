//! Command handlers. Each one runs a single workflow and prints its outcome on stdout.

use anyhow::{Context, Result};
use nodelock::domain::constants::{LOCAL_KEY_BLOB, SHARE_A_BLOB, SHARE_B_BLOB};
use nodelock::hwid::Reading;
use nodelock::{Credential, Custody, CustodyError, Enrollment};
use std::io::{self, BufRead};

pub fn provision(custody: &Custody, credential: Option<String>, stdin: bool) -> Result<()> {
    let credential = match credential {
        Some(value) if !stdin => Credential::from(value),
        _ => read_stdin_line()?,
    };

    custody.provision(&credential).context("Provisioning failed")?;
    println!(
        "Provisioned {} bytes into {}",
        credential.len(),
        custody.settings().shared_dir().display()
    );
    Ok(())
}

pub fn enroll(custody: &Custody) -> Result<()> {
    match custody.enroll().context("Enrollment failed")? {
        Enrollment::Enrolled => println!("Enrolled"),
        Enrollment::AlreadyEnrolled => println!("Already enrolled"),
    }
    Ok(())
}

pub fn recover(custody: &Custody, reveal: bool) -> Result<()> {
    let credential = custody.recover().context("Recovery failed")?;
    if reveal {
        println!("{}", String::from_utf8_lossy(credential.as_bytes()));
    } else {
        println!("Recovered {} bytes", credential.len());
    }
    Ok(())
}

pub fn status(custody: &Custody) -> Result<()> {
    let status = custody.status().context("Status check failed")?;
    for (name, present) in [
        (SHARE_B_BLOB, status.share_b),
        (SHARE_A_BLOB, status.share_a),
        (LOCAL_KEY_BLOB, status.local_key),
    ] {
        println!("{name:<16} {}", if present { "present" } else { "missing" });
    }
    println!("{:<16} {}", "provisioned", yes_no(status.is_provisioned()));
    println!("{:<16} {}", "enrolled", yes_no(status.is_enrolled()));
    Ok(())
}

pub fn probe(custody: &Custody) -> Result<()> {
    println!("os               {}", custody.settings().os());
    for (attribute, reading) in custody.inspect() {
        let reading = match reading {
            Reading::Value => "value",
            Reading::Sentinel => "none",
        };
        println!("{:<16} {reading}", attribute.as_ref());
    }
    Ok(())
}

fn read_stdin_line() -> Result<Credential> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read credential from stdin")?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(CustodyError::Configuration {
            message: "no credential on stdin".into(),
            context: None,
        }
        .into());
    }
    Ok(Credential::from(trimmed))
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
