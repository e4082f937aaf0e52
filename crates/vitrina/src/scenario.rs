//! Scenario script parsing.
//!
//! Scenario scripts are plain text in the familiar Gherkin shape: a
//! `Feature:` header, `Scenario:` blocks, and `Given`/`When`/`Then`/`And`/
//! `But` step lines. The keyword is carried for reporting only; dispatch
//! matches on the sentence after the keyword, so the same sentence may be
//! introduced by any keyword.

use crate::result::{VitrinaError, VitrinaResult};

/// Step keyword as written in the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKeyword {
    /// Given
    Given,
    /// When
    When,
    /// Then
    Then,
    /// And
    And,
    /// But
    But,
}

impl StepKeyword {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "Given" => Some(Self::Given),
            "When" => Some(Self::When),
            "Then" => Some(Self::Then),
            "And" => Some(Self::And),
            "But" => Some(Self::But),
            _ => None,
        }
    }

    /// The keyword as written
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

/// One step line: keyword plus the sentence to dispatch on
#[derive(Debug, Clone)]
pub struct StepLine {
    /// Keyword introducing the line
    pub keyword: StepKeyword,
    /// Sentence matched against the step catalogue
    pub sentence: String,
}

/// A named scenario: an ordered list of steps
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name from the script
    pub name: String,
    /// Steps in script order
    pub steps: Vec<StepLine>,
}

/// A parsed feature file
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature name from the script
    pub name: String,
    /// Scenarios in script order
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Parse a feature script.
    ///
    /// Blank lines and `#` comments are skipped. Step lines outside a
    /// scenario, or lines that are neither headers nor steps, are invalid.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::InvalidArgument`] on malformed input.
    pub fn parse(text: &str) -> VitrinaResult<Self> {
        let mut name = String::new();
        let mut scenarios: Vec<Scenario> = Vec::new();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("Feature:") {
                name = rest.trim().to_string();
                continue;
            }
            if let Some(rest) = line.strip_prefix("Scenario:") {
                scenarios.push(Scenario {
                    name: rest.trim().to_string(),
                    steps: Vec::new(),
                });
                continue;
            }

            let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
            let keyword = StepKeyword::parse(word).ok_or_else(|| VitrinaError::InvalidArgument {
                message: format!("line {}: expected a step keyword, got {line:?}", line_no + 1),
            })?;
            let sentence = rest.trim();
            if sentence.is_empty() {
                return Err(VitrinaError::InvalidArgument {
                    message: format!("line {}: step keyword without a sentence", line_no + 1),
                });
            }
            let scenario = scenarios
                .last_mut()
                .ok_or_else(|| VitrinaError::InvalidArgument {
                    message: format!("line {}: step outside any scenario", line_no + 1),
                })?;
            scenario.steps.push(StepLine {
                keyword,
                sentence: sentence.to_string(),
            });
        }

        Ok(Self { name, scenarios })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
# add-to-cart happy path
Feature: Cart

  Scenario: Add a product to the cart
    Given user is on the product page
    When user adds the product to the cart
    And user is on the cart page
    Then user sees the message \"Item has been added to cart\"

  Scenario: Empty cart checkout
    Given user is on the cart page
    When user tries to proceed to checkout with an empty cart
    Then user should be prevented from proceeding
";

    #[test]
    fn test_parse_feature() {
        let feature = Feature::parse(SCRIPT).unwrap();
        assert_eq!(feature.name, "Cart");
        assert_eq!(feature.scenarios.len(), 2);

        let first = &feature.scenarios[0];
        assert_eq!(first.name, "Add a product to the cart");
        assert_eq!(first.steps.len(), 4);
        assert_eq!(first.steps[0].keyword, StepKeyword::Given);
        assert_eq!(first.steps[0].sentence, "user is on the product page");
        assert_eq!(first.steps[2].keyword, StepKeyword::And);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let feature = Feature::parse("Feature: X\n\n# nothing\nScenario: Y\n  Given user is on the cart page\n").unwrap();
        assert_eq!(feature.scenarios[0].steps.len(), 1);
    }

    #[test]
    fn test_step_outside_scenario_fails() {
        let err = Feature::parse("Feature: X\nGiven user is on the cart page\n").unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unknown_keyword_fails() {
        let err = Feature::parse("Feature: X\nScenario: Y\nWhenever something\n").unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_bare_keyword_fails() {
        let err = Feature::parse("Feature: X\nScenario: Y\nGiven\n").unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
    }
}
