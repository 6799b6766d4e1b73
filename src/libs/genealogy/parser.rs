//! Reader of plain text event listings.
//!
//! ```text
//! # comment
//! event 17 pdf 21 -5 process 10 x 0.012 0.3
//! 0 2212 3 -
//! 1 2212 3 -
//! 2 21 3 0
//! 3 -5 3 1
//! 4 -5 3 2,3 45.1 -0.8 1.2 60.3
//! jet 42.0 -0.75 1.19 58.0
//! ```
//!
//! Particle lines are `index pdgId status mothers [pt eta phi energy]`, with
//! `mothers` a comma separated list of indices or `-`. Daughters are derived
//! from the mothers in listing order.

use std::io::BufRead;

use super::error::GenealogyError;
use super::event::Event;
use super::particle::{Kinematics, ParticleId};

/// Streams events out of a listing, one at a time.
pub struct EventReader<R: BufRead> {
    reader: R,
    line_no: usize,
    /// Header of the next event, already consumed from the reader
    pending: Option<(usize, String)>,
    done: bool,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending: None,
            done: false,
        }
    }

    /// Next significant line, skipping blanks and comments
    fn next_line(&mut self) -> Result<Option<(usize, String)>, GenealogyError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
    }

    fn read_event(&mut self) -> Result<Option<Event>, GenealogyError> {
        let header = match self.pending.take() {
            Some(header) => header,
            None => match self.next_line()? {
                Some(header) => header,
                None => return Ok(None),
            },
        };

        let mut event = parse_header(header.0, &header.1)?;
        let mut mothers_of: Vec<(usize, Vec<ParticleId>)> = Vec::new();

        while let Some((line_no, line)) = self.next_line()? {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "event" => {
                    self.pending = Some((line_no, line));
                    break;
                }
                "jet" => {
                    let kinematics = parse_kinematics(&parts[1..], line_no, &line)?
                        .ok_or_else(|| parse_error("jet needs pt eta phi energy", line_no, &line))?;
                    event.jets.push(kinematics);
                }
                _ => {
                    let (pdg_id, status, mothers, kinematics) =
                        parse_particle(&parts, event.len(), line_no, &line)?;
                    let id = event.add_particle(pdg_id, status);
                    if let Some(kinematics) = kinematics {
                        event.set_kinematics(id, kinematics);
                    }
                    mothers_of.push((line_no, mothers));
                }
            }
        }

        // Mothers may point forward, link once all particles are known
        for (child, (line_no, mothers)) in mothers_of.into_iter().enumerate() {
            for mother in mothers {
                event.add_mother(child, mother).map_err(|e| GenealogyError::Parse {
                    message: e.to_string(),
                    line: line_no,
                    snippet: format!("event {}", event.number),
                })?;
            }
        }

        if !event.has_pdf_info() {
            tracing::warn!(
                event = event.number,
                "no PDF info, falling back to partons entering the hard process"
            );
        }

        Ok(Some(event))
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event, GenealogyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read all events of a listing
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>, GenealogyError> {
    EventReader::new(reader).collect()
}

fn parse_error(message: &str, line: usize, snippet: &str) -> GenealogyError {
    GenealogyError::Parse {
        message: message.to_string(),
        line,
        snippet: snippet.to_string(),
    }
}

fn parse_num<T: std::str::FromStr>(
    token: &str,
    what: &str,
    line: usize,
    snippet: &str,
) -> Result<T, GenealogyError> {
    token
        .parse::<T>()
        .map_err(|_| parse_error(&format!("invalid {}: '{}'", what, token), line, snippet))
}

fn parse_header(line_no: usize, line: &str) -> Result<Event, GenealogyError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts[0] != "event" {
        return Err(parse_error("expected an event header", line_no, line));
    }
    let number = parts
        .get(1)
        .ok_or_else(|| parse_error("missing event number", line_no, line))?;
    let mut event = Event::new(parse_num(number, "event number", line_no, line)?);

    let mut i = 2;
    while i < parts.len() {
        match parts[i] {
            "pdf" if i + 2 < parts.len() => {
                let first = parse_num(parts[i + 1], "PDF id", line_no, line)?;
                let second = parse_num(parts[i + 2], "PDF id", line_no, line)?;
                event.set_pdf_ids(first, second);
                i += 3;
            }
            "x" if i + 2 < parts.len() => {
                let first = parse_num(parts[i + 1], "PDF x", line_no, line)?;
                let second = parse_num(parts[i + 2], "PDF x", line_no, line)?;
                event.pdf_x = Some([first, second]);
                i += 3;
            }
            "process" if i + 1 < parts.len() => {
                event.process_id = Some(parse_num(parts[i + 1], "process id", line_no, line)?);
                i += 2;
            }
            field => {
                return Err(parse_error(
                    &format!("unknown or incomplete header field '{}'", field),
                    line_no,
                    line,
                ))
            }
        }
    }

    Ok(event)
}

fn parse_kinematics(
    parts: &[&str],
    line_no: usize,
    line: &str,
) -> Result<Option<Kinematics>, GenealogyError> {
    match parts.len() {
        0 => Ok(None),
        4 => Ok(Some(Kinematics::new(
            parse_num(parts[0], "pt", line_no, line)?,
            parse_num(parts[1], "eta", line_no, line)?,
            parse_num(parts[2], "phi", line_no, line)?,
            parse_num(parts[3], "energy", line_no, line)?,
        ))),
        _ => Err(parse_error("kinematics needs pt eta phi energy", line_no, line)),
    }
}

type ParticleFields = (i32, i32, Vec<ParticleId>, Option<Kinematics>);

fn parse_particle(
    parts: &[&str],
    expected: usize,
    line_no: usize,
    line: &str,
) -> Result<ParticleFields, GenealogyError> {
    if parts.len() < 4 {
        return Err(parse_error(
            "particle needs index, pdgId, status and mothers",
            line_no,
            line,
        ));
    }

    let index: usize = parse_num(parts[0], "particle index", line_no, line)?;
    if index != expected {
        return Err(parse_error(
            &format!("particle index {} out of sequence, expected {}", index, expected),
            line_no,
            line,
        ));
    }
    let pdg_id = parse_num(parts[1], "pdgId", line_no, line)?;
    let status = parse_num(parts[2], "status", line_no, line)?;

    let mothers = if parts[3] == "-" {
        Vec::new()
    } else {
        parts[3]
            .split(',')
            .map(|m| parse_num(m, "mother index", line_no, line))
            .collect::<Result<Vec<_>, _>>()?
    };

    let kinematics = parse_kinematics(&parts[4..], line_no, line)?;

    Ok((pdg_id, status, mothers, kinematics))
}
