//! Command interpreter
//!
//! One line in, exactly one response out: a created id, a record, a list of
//! records, a count, a diagnostic, or nothing for successful `destroy` /
//! `update`. Failed persists are logged and the prompt continues.

use std::io::{BufRead, Write};

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::diagnostics::Diagnostic;
use super::errors::{ConsoleError, ConsoleResult};
use super::parse::{literal_value, parse_update, unquote};
use super::rewrite::{rewrite, Rewrite};
use crate::model::{composite_key, ModelError, Record, READ_ONLY_FIELDS};
use crate::registry::ClassName;
use crate::storage::FileStorage;

/// Prompt shown before each interactive line
pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Documented commands and their help text, in `help` order.
const COMMANDS: [(&str, &str); 8] = [
    ("all", "Print all instances, or all instances of a class: all [<class>]"),
    ("count", "Print the number of instances of a class: count <class>"),
    ("create", "Create an instance, save it and print its id: create <class>"),
    ("destroy", "Delete an instance: destroy <class> <id>"),
    ("help", "List commands, or describe one: help [<command>]"),
    ("quit", "Exit the console"),
    ("show", "Print an instance: show <class> <id>"),
    (
        "update",
        "Set an attribute and save: update <class> <id> <attribute> \"<value>\"",
    ),
];

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive console over a storage table.
pub struct Console<W: Write> {
    storage: FileStorage,
    out: W,
    prompt: String,
}

impl<W: Write> Console<W> {
    pub fn new(storage: FileStorage, out: W) -> Self {
        Self {
            storage,
            out,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Output sink, e.g. to drain a `Vec<u8>` between commands.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (FileStorage, W) {
        (self.storage, self.out)
    }

    /// Reads and executes lines until `quit` or end of input.
    ///
    /// The prompt is written only when `interactive`. A storage failure is
    /// logged and does not end the loop.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> ConsoleResult<()> {
        let mut line = String::new();
        loop {
            if interactive {
                write!(self.out, "{}", self.prompt)?;
                self.out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                if interactive {
                    writeln!(self.out)?;
                }
                return Ok(());
            }

            match self.onecmd(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(ConsoleError::Storage(e)) => {
                    error!(code = e.code(), error = %e, "command failed to persist");
                }
                Err(e) => return Err(e),
            }
            self.out.flush()?;
        }
    }

    /// Executes a single line.
    pub fn onecmd(&mut self, line: &str) -> ConsoleResult<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        match command {
            "quit" => return Ok(Flow::Exit),
            "EOF" => {
                writeln!(self.out)?;
                return Ok(Flow::Exit);
            }
            _ => {}
        }

        if !self.dispatch(command, args)? {
            self.default(line)?;
        }
        Ok(Flow::Continue)
    }

    /// Runs a canonical command. Returns `false` if `command` is unknown.
    fn dispatch(&mut self, command: &str, args: &str) -> ConsoleResult<bool> {
        match command {
            "create" => self.do_create(args)?,
            "show" => self.do_show(args)?,
            "destroy" => self.do_destroy(args)?,
            "all" => self.do_all(args)?,
            "count" => self.do_count(args)?,
            "update" => self.do_update(args)?,
            "help" => self.do_help(args)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Handles lines that are not a known command: dotted calls are
    /// rewritten and dispatched once, anything else is unknown syntax.
    fn default(&mut self, line: &str) -> ConsoleResult<()> {
        match rewrite(line) {
            Some(Rewrite::Command(command)) => {
                let (name, args) = command.split_once(' ').unwrap_or((command.as_str(), ""));
                if !self.dispatch(name, args)? {
                    self.report(Diagnostic::UnknownSyntax(line.to_string()))?;
                }
                Ok(())
            }
            Some(Rewrite::BulkUpdate {
                class_name,
                id,
                body,
            }) => self.bulk_update(&class_name, &id, &body),
            None => self.report(Diagnostic::UnknownSyntax(line.to_string())),
        }
    }

    fn do_create(&mut self, args: &str) -> ConsoleResult<()> {
        let class = match self.resolve_class(args.split_whitespace().next()) {
            Ok(class) => class,
            Err(d) => return self.report(d),
        };

        let mut record = class.construct(&mut self.storage);
        record.save(&mut self.storage)?;
        info!(key = %record.key(), "record created");
        writeln!(self.out, "{}", record.id())?;
        Ok(())
    }

    fn do_show(&mut self, args: &str) -> ConsoleResult<()> {
        let mut words = args.split_whitespace();
        match self.resolve_key(words.next(), words.next()) {
            Ok(key) => {
                if let Some(record) = self.storage.get(&key) {
                    writeln!(self.out, "{}", record)?;
                }
                Ok(())
            }
            Err(d) => self.report(d),
        }
    }

    fn do_destroy(&mut self, args: &str) -> ConsoleResult<()> {
        let mut words = args.split_whitespace();
        let key = match self.resolve_key(words.next(), words.next()) {
            Ok(key) => key,
            Err(d) => return self.report(d),
        };

        self.storage.delete(&key);
        self.storage.persist()?;
        info!(key = %key, "record destroyed");
        Ok(())
    }

    /// Prints the display form of each record as a JSON list of strings.
    fn do_all(&mut self, args: &str) -> ConsoleResult<()> {
        let rendered: Vec<String> = match args.split_whitespace().next() {
            Some(name) => match ClassName::lookup(name) {
                Some(class) => self
                    .storage
                    .records_of(class)
                    .map(Record::to_string)
                    .collect(),
                None => return self.report(Diagnostic::ClassDoesNotExist),
            },
            None => self.storage.all().values().map(Record::to_string).collect(),
        };
        writeln!(self.out, "{}", Value::from(rendered))?;
        Ok(())
    }

    fn do_count(&mut self, args: &str) -> ConsoleResult<()> {
        match self.resolve_class(args.split_whitespace().next()) {
            Ok(class) => {
                writeln!(self.out, "{}", self.storage.count(class))?;
                Ok(())
            }
            Err(d) => self.report(d),
        }
    }

    fn do_update(&mut self, args: &str) -> ConsoleResult<()> {
        let Some(parsed) = parse_update(args) else {
            return self.report(Diagnostic::ClassNameMissing);
        };
        let key = match self.resolve_key(Some(parsed.class_name), parsed.id) {
            Ok(key) => key,
            Err(d) => return self.report(d),
        };
        let Some(attribute) = parsed.attribute else {
            return self.report(Diagnostic::AttributeNameMissing);
        };
        let Some(raw) = parsed.value else {
            return self.report(Diagnostic::ValueMissing);
        };
        if READ_ONLY_FIELDS.contains(&attribute) {
            warn!(attribute, "read-only attribute update refused");
            return self.report(Diagnostic::AttributeReadOnly);
        }

        let Some(mut record) = self.storage.get(&key).cloned() else {
            return self.report(Diagnostic::NoInstanceFound);
        };
        // Declared coercions see the unquoted text; everything else follows
        // the literal rule.
        let value = match record.class_name().coercion_for(attribute) {
            Some(_) => Value::String(unquote(raw)),
            None => literal_value(raw),
        };
        if let Err(e) = record.set_field(attribute, value) {
            return self.report(field_diagnostic(attribute, &e));
        }
        record.save(&mut self.storage)?;
        Ok(())
    }

    /// `Class.update("id", {...})`: every pair is applied, then the record
    /// is saved once. Any rejected pair aborts the whole update.
    fn bulk_update(&mut self, class_name: &str, id: &str, body: &str) -> ConsoleResult<()> {
        let key = match self.resolve_key(Some(class_name), Some(id)) {
            Ok(key) => key,
            Err(d) => return self.report(d),
        };
        let pairs: Map<String, Value> = match serde_json::from_str(&body.replace('\'', "\"")) {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(error = %e, "bulk update argument is not a JSON object");
                return self.report(Diagnostic::MalformedDictionary);
            }
        };

        let Some(mut record) = self.storage.get(&key).cloned() else {
            return self.report(Diagnostic::NoInstanceFound);
        };
        for (attribute, value) in pairs {
            if let Err(e) = record.set_field(&attribute, value) {
                return self.report(field_diagnostic(&attribute, &e));
            }
        }
        record.save(&mut self.storage)?;
        Ok(())
    }

    fn do_help(&mut self, args: &str) -> ConsoleResult<()> {
        match args.split_whitespace().next() {
            None => {
                let names: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();
                writeln!(self.out, "Documented commands: {}", names.join(" "))?;
            }
            Some(topic) => match COMMANDS.iter().find(|(name, _)| *name == topic) {
                Some((_, text)) => writeln!(self.out, "{}", text)?,
                None => writeln!(self.out, "*** No help on {}", topic)?,
            },
        }
        Ok(())
    }

    /// Class checks, in order: missing, then unknown.
    fn resolve_class(&self, name: Option<&str>) -> Result<ClassName, Diagnostic> {
        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(Diagnostic::ClassNameMissing)?;
        ClassName::lookup(name).ok_or(Diagnostic::ClassDoesNotExist)
    }

    /// Class checks, then id missing, then instance not found.
    fn resolve_key(&self, class: Option<&str>, id: Option<&str>) -> Result<String, Diagnostic> {
        let class = self.resolve_class(class)?;
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(Diagnostic::InstanceIdMissing)?;
        let key = composite_key(class, id);
        if self.storage.contains(&key) {
            Ok(key)
        } else {
            Err(Diagnostic::NoInstanceFound)
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) -> ConsoleResult<()> {
        writeln!(self.out, "{}", diagnostic)?;
        Ok(())
    }
}

fn field_diagnostic(attribute: &str, err: &ModelError) -> Diagnostic {
    match err {
        ModelError::ReadOnlyField(_) => {
            warn!(attribute, "read-only attribute update refused");
            Diagnostic::AttributeReadOnly
        }
        _ => {
            warn!(attribute, error = %err, "attribute value rejected");
            Diagnostic::InvalidValue(attribute.to_string())
        }
    }
}
