use std::io::{BufRead, Write};

use tracing::debug;

use super::InputCollector;
use crate::error::Result;
use crate::model::SearchRequest;

const MAX_PROMPT_RESULTS: usize = 10;

/// Line-oriented collector: asks for each field in turn on `output` and reads answers
/// from `input`. End of input at any prompt counts as the user quitting.
pub struct PromptForm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptForm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?; // Ensure prompt is shown before input

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn location(&mut self) -> Result<Option<(String, String)>> {
        loop {
            let Some(city) = self.ask("Enter the city: ")? else {
                return Ok(None);
            };
            let Some(state) = self.ask("Enter the state abbreviation, i.e. OH for Ohio: ")? else {
                return Ok(None);
            };

            if state.chars().count() != 2 {
                writeln!(self.output, "State abbreviations are two letters.\n")?;
                continue;
            }

            let Some(check) = self.ask(&format!("Is {city}, {state} correct? (Y/N)\n-> "))? else {
                return Ok(None);
            };
            if check.eq_ignore_ascii_case("y") {
                return Ok(Some((city, state)));
            }
            writeln!(self.output, "Let's try again.\n")?;
        }
    }

    fn search_terms(&mut self) -> Result<Option<Vec<String>>> {
        let mut terms = Vec::new();
        loop {
            let Some(term) = self.ask("Enter a search term (enter 'done' when finished): ")? else {
                return Ok(None);
            };
            if term.eq_ignore_ascii_case("done") {
                return Ok(Some(terms));
            }
            if !term.is_empty() {
                terms.push(term);
            }
        }
    }

    fn result_count(&mut self) -> Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask("Enter the number of search results desired: ")? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=MAX_PROMPT_RESULTS).contains(&n) => {
                    writeln!(self.output, "{n} results will be retrieved momentarily.")?;
                    return Ok(Some(n));
                }
                Ok(_) => writeln!(
                    self.output,
                    "ERROR: Choose between 1 and {MAX_PROMPT_RESULTS}.\n"
                )?,
                Err(_) => writeln!(self.output, "ERROR: Enter a number.\n")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> InputCollector for PromptForm<R, W> {
    fn collect_input(&mut self) -> Result<Option<SearchRequest>> {
        let Some((city, state)) = self.location()? else {
            debug!("input closed at location prompt");
            return Ok(None);
        };
        let Some(terms) = self.search_terms()? else {
            debug!("input closed at search term prompt");
            return Ok(None);
        };
        let Some(max_results) = self.result_count()? else {
            debug!("input closed at result count prompt");
            return Ok(None);
        };

        SearchRequest::new(city, state, terms, max_results).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(answers: &str) -> (Option<SearchRequest>, String) {
        let mut form = PromptForm::new(Cursor::new(answers.to_string()), Vec::new());
        let request = form.collect_input().unwrap();
        let output = String::from_utf8(form.into_output()).unwrap();
        (request, output)
    }

    #[test]
    fn collects_full_request() {
        let (request, output) =
            collect("Columbus\nOH\nY\ncommunications\nhuman resources\ndone\n5\n");
        let request = request.unwrap();

        assert_eq!(request.city, "Columbus");
        assert_eq!(request.state, "OH");
        assert_eq!(request.search_terms, vec!["communications", "human resources"]);
        assert_eq!(request.max_results, 5);
        assert!(output.contains("5 results will be retrieved momentarily."));
    }

    #[test]
    fn retries_location_when_not_confirmed() {
        let (request, output) = collect("Renoc\nNV\nN\nReno\nNV\ny\ndone\n3\n");
        let request = request.unwrap();

        assert_eq!(request.city, "Reno");
        assert_eq!(request.state, "NV");
        assert!(request.search_terms.is_empty());
        assert!(output.contains("Let's try again."));
    }

    #[test]
    fn rejects_long_state_names() {
        let (request, output) = collect("Reno\nNevada\nReno\nNV\ny\nrust\ndone\n1\n");
        assert_eq!(request.unwrap().state, "NV");
        assert!(output.contains("two letters"));
    }

    #[test]
    fn reprompts_for_bad_counts() {
        let (request, output) = collect("Reno\nNV\ny\ndone\na\n-1\n11\n0\n4\n");
        assert_eq!(request.unwrap().max_results, 4);
        assert_eq!(output.matches("ERROR: Enter a number.").count(), 2);
        assert_eq!(output.matches("ERROR: Choose between 1 and 10.").count(), 2);
    }

    #[test]
    fn end_of_input_is_cancellation() {
        assert!(collect("").0.is_none());
        assert!(collect("Columbus\nOH\ny\npython\n").0.is_none());
    }
}
