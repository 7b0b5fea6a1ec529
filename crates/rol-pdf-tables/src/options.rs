use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ExtractError;

/// 1-based page filter such as `1-3,5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }
}

fn parse_page(token: &str) -> Result<u32, ExtractError> {
    match token.trim().parse::<u32>() {
        Ok(0) => Err(ExtractError::InvalidPageSelection(
            "pages are 1-based".to_string(),
        )),
        Ok(page) => Ok(page),
        Err(_) => Err(ExtractError::InvalidPageSelection(format!(
            "'{token}' is not a page number"
        ))),
    }
}

fn parse_token(token: &str) -> Result<RangeInclusive<u32>, ExtractError> {
    let Some((start, end)) = token.split_once('-') else {
        let page = parse_page(token)?;
        return Ok(page..=page);
    };

    let (start, end) = (parse_page(start)?, parse_page(end)?);
    if end < start {
        return Err(ExtractError::InvalidPageSelection(format!(
            "range '{token}' ends before it starts"
        )));
    }
    Ok(start..=end)
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            pages.extend(parse_token(token)?);
        }

        if pages.is_empty() {
            return Err(ExtractError::InvalidPageSelection(
                "selection is empty".to_string(),
            ));
        }

        Ok(Self { pages })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    /// Minimum cells a line needs to count as a table row.
    pub min_cols: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            min_cols: 2,
        }
    }
}
