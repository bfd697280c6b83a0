use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Private key algorithm of a signing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[default]
    #[strum(serialize = "RSA")]
    #[serde(rename = "RSA")]
    Rsa,

    #[strum(serialize = "ECDSA")]
    #[serde(rename = "ECDSA")]
    Ecdsa,

    #[strum(serialize = "Ed25519")]
    #[serde(rename = "Ed25519")]
    Ed25519,
}

impl KeyAlgorithm {
    /// Whether keys of this algorithm come in different sizes.
    ///
    /// RSA sizes are modulus lengths, ECDSA sizes are curve sizes (256, 384, 521).
    /// Ed25519 keys always have the same size.
    #[must_use]
    pub const fn has_variable_size(self) -> bool {
        !matches!(self, Self::Ed25519)
    }
}
