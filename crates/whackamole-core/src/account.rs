//! Sign-up and sign-in on top of the ledger's owners table.
//!
//! Passwords are stored as `salt$sha256(salt || password)`, both hex encoded.

use std::sync::Arc;

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{AuthFailure, Error, Result};
use crate::storage::{Owner, OwnerId, ScoreLedger};

const SALT_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct Accounts {
    ledger: Arc<ScoreLedger>,
}

impl Accounts {
    pub fn new(ledger: Arc<ScoreLedger>) -> Self {
        Self { ledger }
    }

    pub fn sign_up(&self, username: &str, password: &str) -> Result<OwnerId> {
        let username = validate_credentials(username, password)?;
        let owner_id = self.ledger.create_owner(username, &hash_secret(password))?;
        info!("Account created: {}", username);
        Ok(owner_id)
    }

    pub fn sign_in(&self, username: &str, password: &str) -> Result<Owner> {
        let username = validate_credentials(username, password)?;
        let owner = self
            .ledger
            .find_owner_by_name(username)
            .ok_or(AuthFailure::NotFound)?;
        if !verify_secret(&owner.secret, password) {
            debug!("Wrong password for {}", username);
            return Err(AuthFailure::WrongSecret.into());
        }
        Ok(owner)
    }

    pub fn ledger(&self) -> &Arc<ScoreLedger> {
        &self.ledger
    }
}

/// Trim the username and reject blank input. Passwords are taken as typed.
fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(Error::EmptyCredentials);
    }
    Ok(username)
}

fn hash_secret(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", hex::encode(salt), digest(&salt, password))
}

fn verify_secret(stored: &str, password: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    match hex::decode(salt_hex) {
        Ok(salt) => digest(&salt, password) == expected,
        Err(_) => false,
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
