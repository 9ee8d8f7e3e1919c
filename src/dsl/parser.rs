//! Line grammar for netlists.
//!
//! Each non-blank line is matched against the alternatives of the active
//! dialect in a fixed order: component, command, comment, subcircuit
//! definition, subcircuit instance. The first alternative that matches
//! wins. A `simulator lang = ...` line switches the active dialect for all
//! following lines. If no alternative matches, the whole parse fails and
//! reports the unparsed remainder of the input.

use log::{error, trace};

use super::ast::*;
use super::dialect::Dialect;
use super::lexer::{is_terminal, Lexer, Line};
use crate::error::{Result, SymnaError};

/// Parser for netlist input.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    dialect: Dialect,
}

impl<'a> Parser<'a> {
    /// Create a new parser starting in the given dialect.
    pub fn new(lexer: Lexer<'a>, dialect: Dialect) -> Self {
        Self { lexer, dialect }
    }

    /// The dialect currently in effect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse the entire input into records.
    pub fn parse(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        while let Some(line) = self.lexer.next_line() {
            if line.is_blank() {
                continue;
            }

            if let Some(record) = self.switch_dialect(&line) {
                records.push(record);
                continue;
            }

            let record = self.parse_line(&line)?;
            trace!("line {}: {:?}", line.number, record);
            records.push(record);
        }

        Ok(records)
    }

    fn switch_dialect(&mut self, line: &Line<'a>) -> Option<Record> {
        let dialect = Dialect::parse_switch(line)?;
        trace!("line {}: switching to {} dialect", line.number, dialect);
        self.dialect = dialect;
        Some(self.command(line))
    }

    fn parse_line(&mut self, line: &Line<'a>) -> Result<Record> {
        if let Some(component) = self.component(line) {
            return Ok(Record::Component(component));
        }
        if self.dialect.is_command(line) {
            return Ok(self.command(line));
        }
        if self.dialect.is_comment(line) {
            return Ok(Self::comment(line));
        }
        if let Some(title) = self.dialect.subcircuit_title(line) {
            let name = title.name.to_string();
            let terminals = title.terminals.iter().map(|t| t.to_string()).collect();
            let body = self.subcircuit_body(line, &name)?;
            return Ok(Record::Subcircuit(SubcircuitDef {
                name,
                terminals,
                body,
                line: line.number,
            }));
        }
        if let Some(inst) = self.dialect.instance(line) {
            return Ok(Record::Instance(InstanceLine {
                label: inst.label.to_string(),
                nodes: inst.nodes.iter().map(|n| n.to_string()).collect(),
                subcircuit: inst.subcircuit.to_string(),
                line: line.number,
            }));
        }

        Err(self.failure(line))
    }

    /// Read body lines up to the closing marker of subcircuit `name`.
    fn subcircuit_body(&mut self, title: &Line<'a>, name: &str) -> Result<Vec<Record>> {
        let mut body = Vec::new();

        loop {
            let Some(line) = self.lexer.next_line() else {
                // Unterminated block: nothing from the title onward matched.
                return Err(self.failure(title));
            };
            if line.is_blank() {
                continue;
            }
            if let Some(record) = self.switch_dialect(&line) {
                body.push(record);
                continue;
            }
            if self.dialect.closes(&line, name) {
                return Ok(body);
            }

            let record = if let Some(component) = self.component(&line) {
                Record::Component(component)
            } else if self.dialect.is_command(&line) {
                self.command(&line)
            } else if self.dialect.is_comment(&line) {
                Self::comment(&line)
            } else {
                return Err(self.failure(&line));
            };
            body.push(record);
        }
    }

    /// Match `<kind-letter><name> <terminal>{n} <value>`.
    ///
    /// A known kind with exactly its terminal count is a component even if
    /// its nets look like directive words. Unrecognized letters still form
    /// a component record (all words between the designator and the value
    /// are terminals) so that construction can report and drop them without
    /// rejecting the file, unless the dialect claims the line's shape.
    fn component(&self, line: &Line<'a>) -> Option<ComponentLine> {
        if line.tokens.len() < 3 {
            return None;
        }

        let words: Vec<&str> = line.tokens.iter().map(|t| t.text).collect();
        let designator = words[0];
        let kind = designator.chars().next().filter(|c| c.is_ascii_alphabetic())?;
        if !is_terminal(designator) || self.dialect.reserves_name(designator) {
            return None;
        }

        let terminals = &words[1..words.len() - 1];
        match ComponentKind::from_letter(kind) {
            Some(k) if terminals.len() != k.terminal_count() => return None,
            Some(_) => {}
            None if self.dialect.reserves(line) => return None,
            None => {}
        }
        if !terminals.iter().all(|t| is_terminal(t)) {
            return None;
        }

        Some(ComponentLine {
            kind: kind.to_ascii_uppercase(),
            name: designator.to_string(),
            nodes: terminals.iter().map(|t| t.to_string()).collect(),
            value: words[words.len() - 1].to_string(),
            line: line.number,
        })
    }

    fn command(&self, line: &Line<'a>) -> Record {
        let words: Vec<String> = line.tokens.iter().map(|t| t.text.to_string()).collect();
        let (keyword, args) = words.split_first().map(|(k, a)| (k.clone(), a.to_vec())).unwrap_or_default();
        Record::Command(CommandLine {
            keyword,
            args,
            text: line.trimmed().to_string(),
            dialect: self.dialect,
            line: line.number,
        })
    }

    fn comment(line: &Line<'a>) -> Record {
        Record::Comment(CommentLine {
            text: line.trimmed().to_string(),
            line: line.number,
        })
    }

    fn failure(&self, line: &Line<'a>) -> SymnaError {
        let remainder = &self.lexer.input()[line.offset..];
        error!("parse failed at line {}. Remaining unparsed: {}", line.number, remainder);
        SymnaError::grammar(line.number, line.first_column(), remainder)
    }
}
