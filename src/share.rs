// ABOUTME: Social share link construction for recipe detail pages
// ABOUTME: Builds URL-encoded links for Twitter, Facebook, LinkedIn, WhatsApp, and copy-link
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use urlencoding::encode;

/// Where a recipe link is shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    /// Tweet intent
    Twitter,
    /// Facebook sharer
    Facebook,
    /// `LinkedIn` off-site share
    #[serde(rename = "linkedin")]
    LinkedIn,
    /// `WhatsApp` message
    #[serde(rename = "whatsapp")]
    WhatsApp,
    /// Plain page URL for the clipboard
    #[serde(rename = "copy")]
    CopyLink,
}

impl ShareTarget {
    /// Every target in menu order
    pub const ALL: [Self; 5] = [
        Self::Twitter,
        Self::Facebook,
        Self::LinkedIn,
        Self::WhatsApp,
        Self::CopyLink,
    ];

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Share on Twitter",
            Self::Facebook => "Share on Facebook",
            Self::LinkedIn => "Share on LinkedIn",
            Self::WhatsApp => "Share on WhatsApp",
            Self::CopyLink => "Copy Link",
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::LinkedIn => "linkedin",
            Self::WhatsApp => "whatsapp",
            Self::CopyLink => "copy",
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "linkedin" => Ok(Self::LinkedIn),
            "whatsapp" => Ok(Self::WhatsApp),
            "copy" | "link" => Ok(Self::CopyLink),
            other => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown share target '{other}'"),
            )),
        }
    }
}

/// Message accompanying shared links
#[must_use]
pub fn share_text(title: &str) -> String {
    format!("Check out this recipe: {title}")
}

/// Detail page URL of recipe `id` under `base_url`
#[must_use]
pub fn recipe_url(base_url: &str, id: &str) -> String {
    format!("{}/recipe/{}", base_url.trim_end_matches('/'), encode(id))
}

/// Share link for `target`
///
/// # Errors
///
/// Returns a validation error when `url` is empty
pub fn share_url(target: ShareTarget, title: &str, url: &str) -> AppResult<String> {
    if url.trim().is_empty() {
        return Err(AppError::missing_field("url"));
    }
    let text = share_text(title);
    Ok(match target {
        ShareTarget::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(&text),
            encode(url)
        ),
        ShareTarget::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={}", encode(url))
        }
        ShareTarget::LinkedIn => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            encode(url)
        ),
        ShareTarget::WhatsApp => {
            format!("https://wa.me/?text={}", encode(&format!("{text} {url}")))
        }
        ShareTarget::CopyLink => url.to_owned(),
    })
}
