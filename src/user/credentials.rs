//! How passwords are prepared for storage and checked at log-in.

use std::fmt::Debug;

use crate::Error;

/// Converts passwords to their stored form and checks log-in attempts against it.
///
/// The log-in and registration handlers only talk to this trait, so a hashing
/// scheme can be swapped in without touching them.
pub trait CredentialScheme: Debug + Send + Sync {
    /// Produce the form of `password` that is written to the database.
    ///
    /// # Errors
    ///
    /// Returns [Error::CredentialError] if the password could not be encoded.
    fn encode(&self, password: &str) -> Result<String, Error>;

    /// Check whether `password` matches `stored`, a value produced by [CredentialScheme::encode].
    ///
    /// # Errors
    ///
    /// Returns [Error::CredentialError] if `stored` could not be interpreted.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, Error>;
}

/// Stores passwords exactly as given and compares them verbatim.
///
/// This is the scheme the server runs with. Passwords are readable by anyone
/// with access to the database file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextCredentials;

impl CredentialScheme for PlainTextCredentials {
    fn encode(&self, password: &str) -> Result<String, Error> {
        Ok(password.to_owned())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, Error> {
        Ok(password == stored)
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialScheme, PlainTextCredentials};

    #[test]
    fn plain_text_round_trip() {
        let scheme = PlainTextCredentials;

        let stored = scheme.encode("hunter2").unwrap();

        assert_eq!(stored, "hunter2");
        assert_eq!(scheme.verify("hunter2", &stored), Ok(true));
    }

    #[test]
    fn plain_text_rejects_wrong_password() {
        let scheme = PlainTextCredentials;

        assert_eq!(scheme.verify("hunter3", "hunter2"), Ok(false));
    }

    #[test]
    fn plain_text_is_case_sensitive() {
        let scheme = PlainTextCredentials;

        assert_eq!(scheme.verify("Hunter2", "hunter2"), Ok(false));
    }
}
