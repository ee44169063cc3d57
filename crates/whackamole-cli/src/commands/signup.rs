//! Account creation.

use std::sync::Arc;

use anyhow::{Result, bail};
use whackamole_core::{Accounts, Error};

use crate::config::DataStores;

pub fn run(stores: &DataStores, username: &str, password: &str) -> Result<()> {
    let ledger = Arc::new(stores.open_ledger()?);
    match Accounts::new(ledger).sign_up(username, password) {
        Ok(_) => {
            println!("Account created! Please sign in.");
            Ok(())
        }
        Err(Error::DuplicateName(_)) => bail!("Username already exists. Try another."),
        Err(Error::EmptyCredentials) => bail!("Please enter username and password."),
        Err(e) => Err(e.into()),
    }
}
