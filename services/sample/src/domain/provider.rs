use std::fmt;
use std::str::FromStr;

use crate::error::SampleError;

pub const CLAIM_NAME_IDENTIFIER: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
pub const CLAIM_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
pub const CLAIM_EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
pub const CLAIM_LOCALITY: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/locality";
pub const CLAIM_FACEBOOK_PHOTO: &str = "urn:facebook:photo";
pub const CLAIM_GOOGLE_PHOTO: &str = "urn:google:photo";
pub const CLAIM_GOOGLE_LOCATION: &str = "urn:google:location";

/// Where a claim value lives in the provider's user-info payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimSource {
    /// `payload[key]`
    Key(&'static str),
    /// `payload[key][sub_key]`
    SubKey(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimMapping {
    pub claim_type: &'static str,
    pub source: ClaimSource,
}

const fn key(claim_type: &'static str, key: &'static str) -> ClaimMapping {
    ClaimMapping {
        claim_type,
        source: ClaimSource::Key(key),
    }
}

const fn sub_key(claim_type: &'static str, key: &'static str, sub: &'static str) -> ClaimMapping {
    ClaimMapping {
        claim_type,
        source: ClaimSource::SubKey(key, sub),
    }
}

const FACEBOOK_CLAIMS: &[ClaimMapping] = &[
    key(CLAIM_NAME_IDENTIFIER, "id"),
    key(CLAIM_NAME, "name"),
    key(CLAIM_EMAIL, "email"),
    key(CLAIM_FACEBOOK_PHOTO, "picture"),
];

const GOOGLE_CLAIMS: &[ClaimMapping] = &[
    key(CLAIM_NAME_IDENTIFIER, "id"),
    key(CLAIM_NAME, "name"),
    key(CLAIM_EMAIL, "email"),
    sub_key(CLAIM_GOOGLE_PHOTO, "image", "url"),
    key(CLAIM_LOCALITY, "language"),
    sub_key(CLAIM_GOOGLE_LOCATION, "location", "name"),
];

/// External OAuth providers the sample signs users in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalProvider {
    Facebook,
    Google,
}

impl ExternalProvider {
    /// Scheme name; also the login provider stored on the user.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Google => "Google",
        }
    }

    pub fn default_userinfo_url(self) -> &'static str {
        match self {
            Self::Facebook => "https://graph.facebook.com/v2.6/me?fields=id,name,email,picture",
            Self::Google => "https://www.googleapis.com/plus/v1/people/me",
        }
    }

    /// Payload key of the provider's email verification flag. The Graph API
    /// returns no such flag.
    pub fn email_verified_key(self) -> Option<&'static str> {
        match self {
            Self::Facebook => None,
            Self::Google => Some("verified_email"),
        }
    }

    pub fn claim_mappings(self) -> &'static [ClaimMapping] {
        match self {
            Self::Facebook => FACEBOOK_CLAIMS,
            Self::Google => GOOGLE_CLAIMS,
        }
    }
}

impl fmt::Display for ExternalProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for ExternalProvider {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Ok(Self::Facebook),
            "google" => Ok(Self::Google),
            _ => Err(SampleError::UnknownProvider(s.to_owned())),
        }
    }
}
