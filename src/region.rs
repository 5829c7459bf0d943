//! Supported Free Fire region codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Region code selecting which upstream server cluster to query.
///
/// Parsing is case-insensitive ("br" and "BR" both work); the canonical
/// form sent upstream is uppercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    /// India.
    #[default]
    IND,
    /// Brazil.
    BR,
    /// Singapore.
    SG,
    /// Russia.
    RU,
    /// Indonesia.
    ID,
    /// Taiwan.
    TW,
    /// United States.
    US,
    /// Vietnam.
    VN,
    /// Thailand.
    TH,
    /// Middle East.
    ME,
    /// Pakistan.
    PK,
    /// Commonwealth of Independent States.
    CIS,
    /// Bangladesh.
    BD,
}

impl Region {
    /// All supported regions, in the order the root endpoint lists them.
    pub const ALL: [Region; 13] = [
        Region::IND,
        Region::BR,
        Region::SG,
        Region::RU,
        Region::ID,
        Region::TW,
        Region::US,
        Region::VN,
        Region::TH,
        Region::ME,
        Region::PK,
        Region::CIS,
        Region::BD,
    ];

    /// Uppercase code sent upstream as the `region` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::IND => "IND",
            Region::BR => "BR",
            Region::SG => "SG",
            Region::RU => "RU",
            Region::ID => "ID",
            Region::TW => "TW",
            Region::US => "US",
            Region::VN => "VN",
            Region::TH => "TH",
            Region::ME => "ME",
            Region::PK => "PK",
            Region::CIS => "CIS",
            Region::BD => "BD",
        }
    }

    /// Comma-separated list of all supported codes, for error messages.
    pub fn supported_list() -> String {
        Region::ALL
            .iter()
            .map(Region::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
