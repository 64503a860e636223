use crate::core::dispatch::{AssistanceService, ResolveOutcome};
use crate::domain::geo::Location;
use crate::domain::model::{RequestId, RequestType, Vehicle};
use crate::domain::ports::Notifier;
use crate::utils::error::{AssistError, Result};
use std::io::{BufRead, Write};

const MENU: &str = "Options: 1=Create Request  2=List Helpers  3=History  4=Resolve  0=Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    CreateRequest,
    ListHelpers,
    History,
    Resolve,
    Unknown(i64),
}

pub fn parse_menu_choice(input: &str) -> Result<MenuChoice> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| AssistError::invalid_input("menu choice", input.trim(), "expected a number"))?;

    Ok(match value {
        0 => MenuChoice::Exit,
        1 => MenuChoice::CreateRequest,
        2 => MenuChoice::ListHelpers,
        3 => MenuChoice::History,
        4 => MenuChoice::Resolve,
        other => MenuChoice::Unknown(other),
    })
}

pub fn parse_request_type(input: &str) -> Result<RequestType> {
    input.parse()
}

fn parse_number(field: &str, input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AssistError::invalid_input(field, trimmed, "expected a decimal number"))?;
    if !value.is_finite() {
        return Err(AssistError::invalid_input(field, trimmed, "expected a finite number"));
    }
    Ok(value)
}

/// Parses a coordinate and checks it lies within `[min, max]`.
pub fn parse_coordinate(field: &str, input: &str, min: f64, max: f64) -> Result<f64> {
    let value = parse_number(field, input)?;
    if value < min || value > max {
        return Err(AssistError::invalid_input(
            field,
            input.trim(),
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

pub fn parse_liters(input: &str) -> Result<f64> {
    let value = parse_number("liters", input)?;
    if value < 0.0 {
        return Err(AssistError::invalid_input("liters", input.trim(), "cannot be negative"));
    }
    Ok(value)
}

pub fn parse_request_id(input: &str) -> Result<RequestId> {
    input
        .trim()
        .parse()
        .map_err(|_| AssistError::invalid_input("request id", input.trim(), "expected a positive integer"))
}

/// Interactive menu over any line source, driving an [`AssistanceService`].
///
/// Service notifications go to the service's notifier; menu text, prompts, helper
/// listings and the request history go to `output`.
pub struct ConsoleSession<'a, N: Notifier, R: BufRead, W: Write> {
    service: &'a mut AssistanceService<N>,
    input: R,
    output: W,
}

impl<'a, N: Notifier, R: BufRead, W: Write> ConsoleSession<'a, N, R, W> {
    pub fn new(service: &'a mut AssistanceService<N>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the user picks 0 or the input ends.
    pub fn run(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "Welcome to {} (console prototype)", title)?;

        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(line) = self.prompt("Choice: ")? else {
                break;
            };

            let choice = match parse_menu_choice(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    tracing::debug!("Ignoring menu input: {}", e);
                    continue;
                }
            };

            let keep_going = match choice {
                MenuChoice::Exit => false,
                MenuChoice::CreateRequest => self.create_request()?,
                MenuChoice::ListHelpers => {
                    self.list_helpers()?;
                    true
                }
                MenuChoice::History => {
                    self.print_history()?;
                    true
                }
                MenuChoice::Resolve => self.resolve_request()?,
                MenuChoice::Unknown(_) => {
                    writeln!(self.output, "Invalid choice.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn create_request(&mut self) -> Result<bool> {
        let Some(request_type) = self.ask("Type (BREAKDOWN/FUEL): ", parse_request_type)? else {
            return Ok(false);
        };
        let Some(reg_no) = self.prompt("Vehicle regNo: ")? else {
            return Ok(false);
        };
        let Some(model) = self.prompt("Vehicle model: ")? else {
            return Ok(false);
        };
        let Some(fuel_type) = self.prompt("Fuel type (Petrol/Diesel): ")? else {
            return Ok(false);
        };
        let Some(lat) = self.ask("Latitude: ", |s| parse_coordinate("latitude", s, -90.0, 90.0))?
        else {
            return Ok(false);
        };
        let Some(lon) =
            self.ask("Longitude: ", |s| parse_coordinate("longitude", s, -180.0, 180.0))?
        else {
            return Ok(false);
        };

        let liters = if request_type == RequestType::Fuel {
            match self.ask("Approx liters needed: ", parse_liters)? {
                Some(liters) => liters,
                None => return Ok(false),
            }
        } else {
            0.0
        };

        self.service.create_request(
            request_type,
            Vehicle::new(reg_no, model, fuel_type),
            Location::new(lat, lon),
            liters,
        );
        Ok(true)
    }

    fn list_helpers(&mut self) -> Result<()> {
        writeln!(self.output, "Available helpers:")?;
        for helper in self.service.list_helpers() {
            writeln!(self.output, "{}", helper)?;
        }
        Ok(())
    }

    // 歷史紀錄是查詢結果，直接印到選單輸出而不是通知
    fn print_history(&mut self) -> Result<()> {
        writeln!(self.output, "=== Request History ===")?;
        for line in self.service.history_lines() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn resolve_request(&mut self) -> Result<bool> {
        let Some(id) = self.ask("Enter request id to resolve: ", parse_request_id)? else {
            return Ok(false);
        };
        if self.service.resolve_request(id) == ResolveOutcome::NotFound {
            tracing::debug!(request_id = id, "Resolve target missing");
        }
        Ok(true)
    }

    /// Prints `label` and reads one trimmed line. `None` means the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // 解析失敗時重新詢問同一欄位
    fn ask<T>(&mut self, label: &str, parse: impl Fn(&str) -> Result<T>) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
            }
        }
    }
}
