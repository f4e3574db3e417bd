//! Daily work-journal engine.
//!
//! Parses a Logseq-style outline journal (tab-indented `-` bullets) into a typed
//! block tree, then reconciles the `NOW`/`LATER` tasks it contains into a report
//! of logged time. The core (`duration`, `grammar`, `core`, `parser`,
//! `reconcile`) is pure; `storage` and `config` are thin I/O layers used by the
//! `worklog` binary.

pub mod duration {
    //! Conversions between textual durations and whole seconds.

    /// Durations are quantized to this many seconds.
    pub const ROUNDING_INTERVAL: u64 = 5 * 60;

    /// Remainders above this many seconds round up to the next interval.
    const ROUND_UP_AFTER: u64 = 90;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum DurationError {
        #[error("invalid H:M:S duration {0:?}")]
        InvalidTimestamp(String),
        #[error("invalid duration token {0:?}: only hours (h) and minutes (m) are supported")]
        InvalidToken(String),
    }

    /// Parse an `H:M:S` duration, as written after `=>` in a clock entry.
    pub fn parse_timestamp_duration(text: &str) -> Result<u64, DurationError> {
        let invalid = || DurationError::InvalidTimestamp(text.to_string());
        let parts = text
            .trim()
            .split(':')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let [hours, minutes, seconds] = parts.as_slice() else {
            return Err(invalid());
        };
        hours
            .checked_mul(3600)
            .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
            .and_then(|total| total.checked_add(*seconds))
            .ok_or_else(invalid)
    }

    /// Parse hand-written input such as `1h 30m` or `45m`.
    ///
    /// `m` tokens accumulate; a later `h` token replaces an earlier one.
    pub fn parse_free_duration(text: &str) -> Result<u64, DurationError> {
        let mut hours = 0;
        let mut minutes = 0;
        for token in text.split_whitespace() {
            let invalid = || DurationError::InvalidToken(token.to_string());
            if let Some(value) = token.strip_suffix('h') {
                hours = value
                    .parse::<u64>()
                    .ok()
                    .and_then(|h| h.checked_mul(3600))
                    .ok_or_else(invalid)?;
            } else if let Some(value) = token.strip_suffix('m') {
                minutes = value
                    .parse::<u64>()
                    .ok()
                    .and_then(|m| m.checked_mul(60))
                    .and_then(|m| m.checked_add(minutes))
                    .ok_or_else(invalid)?;
            } else {
                return Err(invalid());
            }
        }
        hours
            .checked_add(minutes)
            .ok_or_else(|| DurationError::InvalidToken(text.trim().to_string()))
    }

    /// Round to a 5-minute boundary. Any positive duration is at least one interval.
    pub fn round_duration(total_seconds: u64) -> u64 {
        if total_seconds == 0 {
            return 0;
        }
        if total_seconds < ROUNDING_INTERVAL {
            return ROUNDING_INTERVAL;
        }

        let base = total_seconds / ROUNDING_INTERVAL;
        let remainder = total_seconds % ROUNDING_INTERVAL;
        let mut rounded = base * ROUNDING_INTERVAL;
        if remainder > ROUND_UP_AFTER {
            rounded = rounded.saturating_add(ROUNDING_INTERVAL);
        }
        rounded
    }

    /// Human-readable form, e.g. `1h 5m`, `45s`, `0s`.
    pub fn format_duration(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = total_seconds % 3600 / 60;
        let seconds = total_seconds % 60;

        let mut parts = Vec::new();
        if hours > 0 {
            parts.push(format!("{hours}h"));
        }
        if minutes > 0 {
            parts.push(format!("{minutes}m"));
        }
        if seconds > 0 || parts.is_empty() {
            parts.push(format!("{seconds}s"));
        }
        parts.join(" ")
    }

    /// Zero-padded `HH:MM:SS`, the form used in clock entries.
    pub fn format_clock_duration(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = total_seconds % 3600 / 60;
        let seconds = total_seconds % 60;
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }

}

pub mod grammar {
    //! `nom` grammars for the inline syntaxes found inside journal lines.

    use crate::duration::parse_timestamp_duration;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use nom::{
        IResult,
        bytes::complete::{is_not, tag, take_while_m_n, take_while1},
        character::complete::{char, digit1, space0, space1},
        combinator::{all_consuming, map_res, opt, recognize, verify},
        error::VerboseError,
        sequence::{delimited, preceded, terminated, tuple},
    };

    type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

    /// Fields of a completed `CLOCK: [start]--[end] => H:MM:SS` line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClockLine {
        pub start: Option<NaiveDateTime>,
        pub end: Option<NaiveDateTime>,
        pub duration: u64,
    }

    /// Match a task identifier such as `ABC-123` or `ABC-123:`; returns it without the colon.
    pub fn parse_task_id(token: &str) -> Option<&str> {
        all_consuming(task_id)(token).ok().map(|(_, id)| id)
    }

    /// Parse a closed clock line. Open intervals (no `=>`) and unreadable
    /// durations do not match; unreadable timestamps leave `start`/`end` unset.
    pub fn parse_clock_line(line: &str) -> Option<ClockLine> {
        let (head, tail) = line.trim().rsplit_once("=>")?;
        let (_, duration) = clock_duration(tail).ok()?;
        let interval = clock_interval(head).ok().map(|(_, interval)| interval);
        Some(ClockLine {
            start: interval.map(|(start, _)| start),
            end: interval.map(|(_, end)| end),
            duration,
        })
    }

    fn task_id(i: &str) -> PResult<'_, &str> {
        terminated(
            recognize(tuple((
                take_while1(|c: char| c.is_ascii_uppercase()),
                char('-'),
                digit1,
            ))),
            opt(char(':')),
        )(i)
    }

    /// The bracketed interval before `=>`; `None` when it does not match.
    fn clock_interval(i: &str) -> PResult<'_, (NaiveDateTime, NaiveDateTime)> {
        let (i, _) = tag("CLOCK:")(i)?;
        let (i, _) = space0(i)?;
        let (i, start) = bracketed_timestamp(i)?;
        let (i, _) = tag("--")(i)?;
        let (i, end) = bracketed_timestamp(i)?;
        let (i, _) = all_consuming(space0)(i)?;
        Ok((i, (start, end)))
    }

    /// The `H:MM:SS` after `=>`.
    fn clock_duration(i: &str) -> PResult<'_, u64> {
        all_consuming(delimited(
            space0,
            map_res(
                recognize(tuple((digit1, char(':'), digit1, char(':'), digit1))),
                parse_timestamp_duration,
            ),
            space0,
        ))(i)
    }

    fn bracketed_timestamp(i: &str) -> PResult<'_, NaiveDateTime> {
        delimited(char('['), timestamp, char(']'))(i)
    }

    /// `2024-01-01 Mon 09:30:00`; the weekday (any language) and seconds are optional.
    fn timestamp(i: &str) -> PResult<'_, NaiveDateTime> {
        let (i, date) = date(i)?;
        let (i, _) = opt(preceded(space1, weekday))(i)?;
        let (i, _) = space1(i)?;
        let (i, time) = time(i)?;
        Ok((i, date.and_time(time)))
    }

    fn weekday(i: &str) -> PResult<'_, &str> {
        verify(is_not(" \t]"), |s: &str| !s.starts_with(|c: char| c.is_ascii_digit()))(i)
    }

    fn date(i: &str) -> PResult<'_, NaiveDate> {
        map_res(
            tuple((number(4, 4), char('-'), number(2, 2), char('-'), number(2, 2))),
            |(y, _, m, _, d)| NaiveDate::from_ymd_opt(y as i32, m, d).ok_or("invalid date"),
        )(i)
    }

    fn time(i: &str) -> PResult<'_, NaiveTime> {
        map_res(
            tuple((
                number(1, 2),
                char(':'),
                number(2, 2),
                opt(preceded(char(':'), number(2, 2))),
            )),
            |(h, _, m, s)| NaiveTime::from_hms_opt(h, m, s.unwrap_or(0)).ok_or("invalid time"),
        )(i)
    }

    fn number<'a>(min: usize, max: usize) -> impl FnMut(&'a str) -> PResult<'a, u32> {
        map_res(
            take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
            |s: &str| s.parse::<u32>(),
        )
    }

}

pub mod core {
    use crate::duration::{format_clock_duration, round_duration};
    use crate::grammar::{parse_clock_line, parse_task_id};
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
    use indexmap::IndexMap;
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Marks the block that absorbs switching cost.
    pub const CATCH_ALL_MARKER: &str = "[CATCH-ALL]";

    /// Leading marker of a structural line.
    pub const BULLET: char = '-';

    /// Indent of the journal root, below any real line.
    pub const ROOT_INDENT: i32 = -1;

    const PROPERTY_DELIMITER: &str = "::";
    const CLOCK_PREFIX: &str = "CLOCK:";
    const CLOCK_DURATION_SEPARATOR: &str = "=>";
    const LOGBOOK_DELIMITERS: [&str; 2] = [":LOGBOOK:", ":END:"];
    const CLOCK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %a %H:%M:%S";

    /* ------------------------------- IDs ------------------------------- */

    /// Index of a block inside its journal's arena.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BlockId(pub usize);

    impl BlockId {
        pub const ROOT: BlockId = BlockId(0);
    }

    /* ---------------------------- Value Objects ---------------------------- */

    /// Work keyword opening a task line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum Keyword {
        /// Timer running.
        Now,
        /// Deferred.
        Later,
    }

    impl Keyword {
        pub fn from_marker(marker: &str) -> Option<Self> {
            match marker {
                "NOW" => Some(Self::Now),
                "LATER" => Some(Self::Later),
                _ => None,
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Now => "NOW",
                Self::Later => "LATER",
            }
        }
    }

    impl fmt::Display for Keyword {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// One completed timed interval.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LogbookEntry {
        /// Unset when the bracketed timestamps could not be read.
        pub start: Option<NaiveDateTime>,
        pub end: Option<NaiveDateTime>,
        /// Seconds, as recorded after `=>` or as synthesized.
        pub duration: u64,
        /// The clock line as written (or rendered, for synthesized entries).
        pub content: String,
    }

    impl LogbookEntry {
        /// Parse a closed `CLOCK:` line.
        pub fn parse(line: &str) -> Option<Self> {
            let clock = parse_clock_line(line)?;
            Some(Self {
                start: clock.start,
                end: clock.end,
                duration: clock.duration,
                content: line.trim().to_string(),
            })
        }

        /// Build an entry for `duration` seconds starting at midnight of `date`.
        pub fn from_duration(date: NaiveDate, duration: u64) -> Self {
            let start = date.and_time(NaiveTime::MIN);
            let seconds = i64::try_from(duration).unwrap_or(i64::MAX);
            let end = Duration::try_seconds(seconds)
                .and_then(|delta| start.checked_add_signed(delta))
                .unwrap_or(NaiveDateTime::MAX);
            let content = format!(
                "{CLOCK_PREFIX} [{}]--[{}] {CLOCK_DURATION_SEPARATOR} {}",
                start.format(CLOCK_TIMESTAMP_FORMAT),
                end.format(CLOCK_TIMESTAMP_FORMAT),
                format_clock_duration(duration),
            );
            Self {
                start: Some(start),
                end: Some(end),
                duration,
                content,
            }
        }
    }

    impl fmt::Display for LogbookEntry {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.content)
        }
    }

    /* ------------------------------ Entities ------------------------------ */

    /// Task data carried by a `NOW`/`LATER` block.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Task {
        pub keyword: Keyword,
        pub task_id: Option<String>,
        pub description: String,
        #[serde(default)]
        pub logbook: Vec<LogbookEntry>,
    }

    impl Task {
        /// Split bullet-stripped content (`LATER ABC-12: Write docs`) into its parts.
        pub fn parse(content: &str) -> Option<Self> {
            let mut parts = content.splitn(3, ' ');
            let keyword = Keyword::from_marker(parts.next()?)?;
            let first = parts.next().unwrap_or_default();
            let rest = parts.next();

            let (task_id, description) = match parse_task_id(first) {
                Some(id) => (Some(id.to_string()), rest.unwrap_or_default().to_string()),
                None => {
                    let description = match rest {
                        Some(rest) => format!("{first} {rest}"),
                        None => first.to_string(),
                    };
                    (None, description)
                }
            };

            Some(Self {
                keyword,
                task_id,
                description,
                logbook: Vec::new(),
            })
        }

        /// Front-insert a synthesized entry so the latest addition is found first.
        pub fn add_to_logbook(&mut self, date: NaiveDate, duration: u64) {
            self.logbook
                .insert(0, LogbookEntry::from_duration(date, duration));
        }

        /// Rounded sum of all logged intervals.
        pub fn total_duration(&self) -> u64 {
            round_duration(
                self.logbook
                    .iter()
                    .fold(0, |total: u64, entry| total.saturating_add(entry.duration)),
            )
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    pub enum BlockKind {
        Root,
        Plain,
        Task(Task),
    }

    /// A node of the outline tree.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Block {
        indent: i32,
        content: String,
        parent: Option<BlockId>,
        #[serde(default)]
        children: Vec<BlockId>,
        #[serde(default)]
        properties: IndexMap<String, String>,
        #[serde(default)]
        extra_lines: Vec<String>,
        kind: BlockKind,
    }

    impl Block {
        fn new(indent: i32, content: String, parent: Option<BlockId>, kind: BlockKind) -> Self {
            Self {
                indent,
                content,
                parent,
                children: vec![],
                properties: IndexMap::new(),
                extra_lines: vec![],
                kind,
            }
        }

        pub fn indent(&self) -> i32 {
            self.indent
        }

        /// Line text without its bullet.
        pub fn content(&self) -> &str {
            &self.content
        }

        pub fn parent(&self) -> Option<BlockId> {
            self.parent
        }

        pub fn children(&self) -> &[BlockId] {
            &self.children
        }

        pub fn properties(&self) -> &IndexMap<String, String> {
            &self.properties
        }

        pub fn extra_lines(&self) -> &[String] {
            &self.extra_lines
        }

        pub fn kind(&self) -> &BlockKind {
            &self.kind
        }

        pub fn task(&self) -> Option<&Task> {
            match &self.kind {
                BlockKind::Task(task) => Some(task),
                BlockKind::Root | BlockKind::Plain => None,
            }
        }

        pub fn is_task(&self) -> bool {
            self.task().is_some()
        }

        pub(crate) fn task_mut(&mut self) -> Option<&mut Task> {
            match &mut self.kind {
                BlockKind::Task(task) => Some(task),
                BlockKind::Root | BlockKind::Plain => None,
            }
        }

        pub(crate) fn remove_property(&mut self, key: &str) -> Option<String> {
            self.properties.shift_remove(key)
        }

        /// Matchers tried in order on each continuation line.
        fn matchers(&self) -> &'static [LineMatcher] {
            match self.kind {
                BlockKind::Task(_) => TASK_MATCHERS,
                BlockKind::Root | BlockKind::Plain => BLOCK_MATCHERS,
            }
        }

        fn add_line(&mut self, line: &str) -> Result<(), ParseError> {
            let line = line.trim();
            for matcher in self.matchers() {
                if matcher(self, line)? == LineClass::Consumed {
                    return Ok(());
                }
            }
            self.extra_lines.push(line.to_string());
            Ok(())
        }
    }

    /* --------------------------- Line classification --------------------------- */

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum LineClass {
        Consumed,
        PassThrough,
    }

    type LineMatcher = fn(&mut Block, &str) -> Result<LineClass, ParseError>;

    const BLOCK_MATCHERS: &[LineMatcher] = &[match_property];
    const TASK_MATCHERS: &[LineMatcher] =
        &[match_property, match_logbook_delimiter, match_clock_entry];

    /// `key:: value`
    fn match_property(block: &mut Block, line: &str) -> Result<LineClass, ParseError> {
        let is_property = line
            .split_whitespace()
            .next()
            .is_some_and(|first| first.ends_with(PROPERTY_DELIMITER));
        let Some((key, value)) = line.split_once(PROPERTY_DELIMITER).filter(|_| is_property)
        else {
            return Ok(LineClass::PassThrough);
        };

        if block.properties.contains_key(key) {
            return Err(ParseError::DuplicateProperty {
                key: key.to_string(),
                block: block.content.clone(),
            });
        }
        block
            .properties
            .insert(key.to_string(), value.trim().to_string());
        Ok(LineClass::Consumed)
    }

    fn match_logbook_delimiter(_: &mut Block, line: &str) -> Result<LineClass, ParseError> {
        if LOGBOOK_DELIMITERS.contains(&line) {
            Ok(LineClass::Consumed)
        } else {
            Ok(LineClass::PassThrough)
        }
    }

    /// Closed clock lines become logbook entries; open ones are dropped.
    fn match_clock_entry(block: &mut Block, line: &str) -> Result<LineClass, ParseError> {
        if !line.starts_with(CLOCK_PREFIX) {
            return Ok(LineClass::PassThrough);
        }
        if line.contains(CLOCK_DURATION_SEPARATOR) {
            let entry = LogbookEntry::parse(line).ok_or_else(|| ParseError::InvalidClockEntry {
                line: line.to_string(),
                block: block.content.clone(),
            })?;
            if let Some(task) = block.task_mut() {
                task.logbook.push(entry);
            }
        }
        Ok(LineClass::Consumed)
    }

    /* ------------------------------ Aggregate ------------------------------ */

    /// One parsed journal document: an arena of blocks rooted at index 0.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Journal {
        date: NaiveDate,
        blocks: Vec<Block>,
        catch_all: Option<BlockId>,
    }

    impl Journal {
        pub fn new(date: NaiveDate) -> Self {
            Self {
                date,
                blocks: vec![Block::new(ROOT_INDENT, String::new(), None, BlockKind::Root)],
                catch_all: None,
            }
        }

        pub fn date(&self) -> NaiveDate {
            self.date
        }

        pub fn root(&self) -> &Block {
            &self.blocks[BlockId::ROOT.0]
        }

        /// Panics if `id` did not come from this journal.
        pub fn block(&self, id: BlockId) -> &Block {
            &self.blocks[id.0]
        }

        pub fn get(&self, id: BlockId) -> Option<&Block> {
            self.blocks.get(id.0)
        }

        pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
            &mut self.blocks[id.0]
        }

        pub fn task(&self, id: BlockId) -> Option<&Task> {
            self.get(id).and_then(Block::task)
        }

        pub(crate) fn task_mut(&mut self, id: BlockId) -> Option<&mut Task> {
            self.blocks.get_mut(id.0).and_then(Block::task_mut)
        }

        /// Number of blocks, not counting the root.
        pub fn len(&self) -> usize {
            self.blocks.len() - 1
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn catch_all(&self) -> Option<BlockId> {
            self.catch_all
        }

        /// Register the catch-all block. Registering the same block again is a no-op.
        pub fn set_catch_all(&mut self, id: BlockId) -> Result<(), ParseError> {
            match self.catch_all {
                Some(existing) if existing != id => Err(ParseError::MultipleCatchAll {
                    existing: self.block(existing).content.clone(),
                    block: self.block(id).content.clone(),
                }),
                _ => {
                    self.catch_all = Some(id);
                    Ok(())
                }
            }
        }

        /// Append a plain block under `parent`.
        pub fn add_block(&mut self, parent: BlockId, indent: i32, raw: &str) -> BlockId {
            self.insert(parent, indent, strip_bullet(raw), BlockKind::Plain)
        }

        /// Append a task block under `parent`; content without a work keyword stays plain.
        pub fn add_task(&mut self, parent: BlockId, indent: i32, raw: &str) -> BlockId {
            let content = strip_bullet(raw);
            let kind = match Task::parse(&content) {
                Some(task) => BlockKind::Task(task),
                None => BlockKind::Plain,
            };
            self.insert(parent, indent, content, kind)
        }

        fn insert(
            &mut self,
            parent: BlockId,
            indent: i32,
            content: String,
            kind: BlockKind,
        ) -> BlockId {
            let id = BlockId(self.blocks.len());
            self.blocks
                .push(Block::new(indent, content, Some(parent), kind));
            self.blocks[parent.0].children.push(id);
            id
        }

        /// Feed a continuation line to block `id`.
        pub fn add_line(&mut self, id: BlockId, line: &str) -> Result<(), ParseError> {
            self.block_mut(id).add_line(line)
        }

        pub fn children(&self, id: BlockId) -> &[BlockId] {
            &self.block(id).children
        }

        /// Task blocks in document order, nested tasks included.
        pub fn tasks(&self) -> impl Iterator<Item = (BlockId, &Task)> + '_ {
            self.descendants(BlockId::ROOT)
                .into_iter()
                .filter_map(|id| self.task(id).map(|task| (id, task)))
        }

        /// Parent chain of `id`, nearest first, ending at the root.
        pub fn ancestors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
            std::iter::successors(self.block(id).parent, |p| self.block(*p).parent)
        }

        /// Depth-first, pre-order ids below `id` (excluding `id`).
        pub fn descendants(&self, id: BlockId) -> Vec<BlockId> {
            let mut out = Vec::new();
            let mut stack: Vec<BlockId> = self.block(id).children.iter().rev().copied().collect();
            while let Some(next) = stack.pop() {
                out.push(next);
                stack.extend(self.block(next).children.iter().rev().copied());
            }
            out
        }
    }

    fn strip_bullet(raw: &str) -> String {
        let trimmed = raw.trim();
        trimmed
            .strip_prefix(BULLET)
            .unwrap_or(trimmed)
            .trim()
            .to_string()
    }

    /* ---------------------------- Errors (domain) ---------------------------- */

    /// Structural errors; any of these aborts the parse.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum ParseError {
        #[error("duplicate property \"{key}\" for block \"{block}\"")]
        DuplicateProperty { key: String, block: String },
        #[error(
            "only a single CATCH-ALL block is supported per journal: \"{block}\" conflicts with \"{existing}\""
        )]
        MultipleCatchAll { existing: String, block: String },
        #[error("malformed clock entry {line:?} for block \"{block}\"")]
        InvalidClockEntry { line: String, block: String },
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn date() -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        }

        #[test]
        fn task_with_id_and_description() {
            let task = Task::parse("LATER ABC-12: Write the docs").unwrap();
            assert_eq!(task.keyword, Keyword::Later);
            assert_eq!(task.task_id.as_deref(), Some("ABC-12"));
            assert_eq!(task.description, "Write the docs");
        }

        #[test]
        fn task_without_id_keeps_whole_remainder() {
            let task = Task::parse("NOW review pull requests").unwrap();
            assert_eq!(task.keyword, Keyword::Now);
            assert_eq!(task.task_id, None);
            assert_eq!(task.description, "review pull requests");

            let bare = Task::parse("LATER XYZ-9").unwrap();
            assert_eq!(bare.task_id.as_deref(), Some("XYZ-9"));
            assert_eq!(bare.description, "");

            assert!(Task::parse("TODO something").is_none());
        }

        #[test]
        fn block_construction_links_parent() {
            let mut journal = Journal::new(date());
            let a = journal.add_block(BlockId::ROOT, 0, "- A");
            let b = journal.add_block(a, 1, "-   B  ");
            assert_eq!(journal.block(b).content(), "B");
            assert_eq!(journal.block(b).parent(), Some(a));
            assert_eq!(journal.block(a).children(), &[b]);
            assert_eq!(journal.root().children(), &[a]);
            assert_eq!(journal.ancestors(b).collect::<Vec<_>>(), vec![a, BlockId::ROOT]);
            assert_eq!(journal.len(), 2);
        }

        #[test]
        fn properties_and_extra_lines() {
            let mut journal = Journal::new(date());
            let a = journal.add_block(BlockId::ROOT, 0, "- notes");
            journal.add_line(a, "  time:: 1h ").unwrap();
            journal.add_line(a, "").unwrap();
            journal.add_line(a, "some text:: not a property").unwrap();
            journal.add_line(a, "CLOCK: [2024-01-01 Mon 09:00:00]").unwrap();

            let block = journal.block(a);
            assert_eq!(block.properties().get("time").map(String::as_str), Some("1h"));
            assert_eq!(
                block.extra_lines(),
                &[
                    "".to_string(),
                    "some text:: not a property".to_string(),
                    "CLOCK: [2024-01-01 Mon 09:00:00]".to_string(),
                ]
            );
        }

        #[test]
        fn duplicate_property_is_an_error() {
            let mut journal = Journal::new(date());
            let a = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-1 thing");
            journal.add_line(a, "time:: 1h").unwrap();
            let err = journal.add_line(a, "time:: 2h").unwrap_err();
            assert_eq!(
                err,
                ParseError::DuplicateProperty {
                    key: "time".into(),
                    block: "LATER ABC-1 thing".into(),
                }
            );
        }

        #[test]
        fn task_logbook_lines() {
            let mut journal = Journal::new(date());
            let t = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-1 thing");
            for line in [
                ":LOGBOOK:",
                "CLOCK: [2024-01-01 Mon 09:00:00]--[2024-01-01 Mon 09:10:00] =>  00:10:00",
                "CLOCK: [2024-01-01 Mon 11:00:00]",
                ":END:",
                "free text",
            ] {
                journal.add_line(t, line).unwrap();
            }
            let block = journal.block(t);
            let task = block.task().unwrap();
            assert_eq!(task.logbook.len(), 1);
            assert_eq!(task.logbook[0].duration, 600);
            assert_eq!(block.extra_lines(), &["free text".to_string()]);
        }

        #[test]
        fn unreadable_clock_duration_is_an_error() {
            let mut journal = Journal::new(date());
            let t = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-1 thing");
            let err = journal
                .add_line(t, "CLOCK: [2024-01-01 Mon 09:00:00]--[2024-01-01 Mon 09:10:00] => soon")
                .unwrap_err();
            assert!(matches!(err, ParseError::InvalidClockEntry { .. }));
        }

        #[test]
        fn unreadable_clock_interval_keeps_duration() {
            let mut journal = Journal::new(date());
            let t = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-1 thing");
            journal.add_line(t, "CLOCK: garbage => 1:00:00").unwrap();
            let entry = &journal.task(t).unwrap().logbook[0];
            assert_eq!(entry.duration, 3600);
            assert_eq!(entry.start, None);
            assert_eq!(entry.content, "CLOCK: garbage => 1:00:00");
        }

        #[test]
        fn synthesized_entries_are_front_inserted() {
            let mut task = Task::parse("LATER ABC-1 thing").unwrap();
            task.add_to_logbook(date(), 600);
            task.add_to_logbook(date(), 3725);
            assert_eq!(task.logbook[0].duration, 3725);
            assert_eq!(
                task.logbook[0].content,
                "CLOCK: [2024-01-01 Mon 00:00:00]--[2024-01-01 Mon 01:02:05] => 01:02:05"
            );
            assert_eq!(
                LogbookEntry::parse(&task.logbook[0].content),
                Some(task.logbook[0].clone())
            );
        }

        #[test]
        fn total_duration_rounds_the_sum() {
            let mut task = Task::parse("LATER ABC-1 thing").unwrap();
            task.add_to_logbook(date(), 150);
            task.add_to_logbook(date(), 150);
            // Per-entry rounding would give 600.
            assert_eq!(task.total_duration(), 300);
        }

        #[test]
        fn catch_all_registration() {
            let mut journal = Journal::new(date());
            let a = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-1 [CATCH-ALL]");
            let b = journal.add_task(BlockId::ROOT, 0, "- LATER ABC-2 [CATCH-ALL]");
            journal.set_catch_all(a).unwrap();
            journal.set_catch_all(a).unwrap();
            assert!(matches!(
                journal.set_catch_all(b),
                Err(ParseError::MultipleCatchAll { .. })
            ));
            assert_eq!(journal.catch_all(), Some(a));
        }

        #[test]
        fn descendants_are_pre_order() {
            let mut journal = Journal::new(date());
            let a = journal.add_block(BlockId::ROOT, 0, "- A");
            let b = journal.add_block(a, 1, "- B");
            let c = journal.add_block(b, 2, "- C");
            let d = journal.add_block(BlockId::ROOT, 0, "- D");
            assert_eq!(journal.descendants(BlockId::ROOT), vec![a, b, c, d]);
            assert_eq!(journal.descendants(a), vec![b, c]);
        }
    }
}

pub mod parser {
    //! Indentation-driven outline parser.
    //!
    //! Strategy:
    //! - Lines starting with `-` open a node; anything else continues the current node.
    //! - Indent is the count of leading tabs. The parent is found by comparing that to the
    //!   current node's indent and walking up ancestors when it decreases.
    //! - Inconsistent indentation yields a best-effort tree, never an error.

    use crate::core::{BULLET, BlockId, CATCH_ALL_MARKER, Journal, ParseError};
    use chrono::NaiveDate;
    use log::debug;

    const TASK_PREFIXES: [&str; 2] = ["- NOW ", "- LATER "];

    /// Build a journal for `date` from its raw lines.
    pub fn parse_journal<I, S>(date: NaiveDate, lines: I) -> Result<Journal, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut journal = Journal::new(date);
        let mut cursor = BlockId::ROOT;

        for line in lines {
            let line = line.as_ref();
            let indent = leading_tabs(line);
            let content = line.trim();

            if !content.starts_with(BULLET) {
                journal.add_line(cursor, content)?;
                continue;
            }

            let parent = resolve_parent(&journal, cursor, indent);
            cursor = if is_task_line(content) {
                journal.add_task(parent, indent, content)
            } else {
                journal.add_block(parent, indent, content)
            };

            if journal.block(cursor).content().contains(CATCH_ALL_MARKER) {
                debug!("catch-all block: {:?}", journal.block(cursor).content());
                journal.set_catch_all(cursor)?;
            }
        }

        debug!("parsed {} blocks for {}", journal.len(), date);
        Ok(journal)
    }

    /// Parse a whole document held in memory.
    pub fn parse_journal_str(date: NaiveDate, text: &str) -> Result<Journal, ParseError> {
        parse_journal(date, text.lines())
    }

    fn leading_tabs(line: &str) -> i32 {
        let tabs = line.chars().take_while(|c| *c == '\t').count();
        i32::try_from(tabs).unwrap_or(i32::MAX)
    }

    fn is_task_line(content: &str) -> bool {
        TASK_PREFIXES
            .iter()
            .any(|prefix| content.starts_with(prefix))
    }

    fn resolve_parent(journal: &Journal, cursor: BlockId, indent: i32) -> BlockId {
        let current = journal.block(cursor);
        if indent > current.indent() {
            return cursor;
        }
        if indent == current.indent() {
            return current.parent().unwrap_or(BlockId::ROOT);
        }

        let mut ancestor = cursor;
        while indent <= journal.block(ancestor).indent() {
            match journal.block(ancestor).parent() {
                Some(parent) => ancestor = parent,
                None => break,
            }
        }
        ancestor
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::{BlockKind, Keyword};

        fn date() -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        }

        fn content_of(journal: &Journal, ids: &[BlockId]) -> Vec<String> {
            ids.iter()
                .map(|id| journal.block(*id).content().to_string())
                .collect()
        }

        #[test]
        fn indentation_builds_children_and_siblings() {
            let journal = parse_journal(date(), ["- A", "\t- B", "- C"]).unwrap();
            let root = journal.root();
            assert_eq!(content_of(&journal, root.children()), vec!["A", "C"]);
            let a = root.children()[0];
            assert_eq!(content_of(&journal, journal.block(a).children()), vec!["B"]);
        }

        #[test]
        fn dedent_walks_up_several_levels() {
            let text = "- A\n\t- B\n\t\t- C\n\t\t\t- D\n\t- E\n- F";
            let journal = parse_journal_str(date(), text).unwrap();
            let root = journal.root();
            assert_eq!(content_of(&journal, root.children()), vec!["A", "F"]);
            let a = root.children()[0];
            assert_eq!(content_of(&journal, journal.children(a)), vec!["B", "E"]);
        }

        #[test]
        fn skipped_levels_are_best_effort() {
            let journal = parse_journal(date(), ["- A", "\t\t\t- B", "\t- C"]).unwrap();
            let a = journal.root().children()[0];
            // C has indent 1, less than B's 3 but greater than A's 0.
            assert_eq!(content_of(&journal, journal.block(a).children()), vec!["B", "C"]);
        }

        #[test]
        fn first_line_indented_attaches_to_root() {
            let journal = parse_journal(date(), ["\t\t- A", "- B"]).unwrap();
            assert_eq!(
                content_of(&journal, journal.root().children()),
                vec!["A", "B"]
            );
        }

        #[test]
        fn continuation_lines_attach_to_current_block() {
            let text = "intro line\n- LATER ABC-1: Build\n\ttime:: 1h\n\tnote\n- Next";
            let journal = parse_journal_str(date(), text).unwrap();
            assert_eq!(journal.root().extra_lines(), &["intro line".to_string()]);

            let task_id = journal.root().children()[0];
            let block = journal.block(task_id);
            assert_eq!(block.properties().get("time").map(String::as_str), Some("1h"));
            assert_eq!(block.extra_lines(), &["note".to_string()]);
            match block.kind() {
                BlockKind::Task(task) => {
                    assert_eq!(task.keyword, Keyword::Later);
                    assert_eq!(task.task_id.as_deref(), Some("ABC-1"));
                    assert_eq!(task.description, "Build");
                }
                other => panic!("expected task, got {other:?}"),
            }
        }

        #[test]
        fn task_keyword_needs_trailing_space() {
            let journal = parse_journal(date(), ["- NOW", "- NOWHERE", "- LATER x"]).unwrap();
            let kinds: Vec<bool> = journal
                .root()
                .children()
                .iter()
                .map(|id| journal.block(*id).is_task())
                .collect();
            assert_eq!(kinds, vec![false, false, true]);
        }

        #[test]
        fn duplicate_property_aborts() {
            let err =
                parse_journal(date(), ["- LATER ABC-1 x", "time:: 1h", "time:: 2h"]).unwrap_err();
            assert!(matches!(err, ParseError::DuplicateProperty { .. }));
        }

        #[test]
        fn catch_all_is_registered_once() {
            let journal = parse_journal(date(), ["- LATER ADMIN-1 Admin [CATCH-ALL]"]).unwrap();
            assert_eq!(journal.catch_all(), Some(journal.root().children()[0]));

            let err = parse_journal(
                date(),
                ["- LATER ADMIN-1 [CATCH-ALL]", "- LATER ADMIN-2 [CATCH-ALL]"],
            )
            .unwrap_err();
            assert!(matches!(err, ParseError::MultipleCatchAll { .. }));
        }
    }
}

pub mod reconcile {
    //! Task reconciliation: collect, charge switching cost, convert manual times, validate.

    use crate::core::{Block, BlockId, Journal, Keyword, LogbookEntry, Task};
    use crate::duration::{parse_free_duration, round_duration};
    use chrono::NaiveDate;
    use indexmap::IndexMap;
    use log::{debug, info};
    use serde::{Deserialize, Serialize};

    /// Property holding a manually entered duration, e.g. `time:: 1h 30m`.
    pub const TIME_PROPERTY: &str = "time";

    const NO_CATCH_ALL: &str = "No CATCH-ALL task found to log context switching cost against. \
                                Not included in total duration.";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Severity {
        Warning,
        Error,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Diagnostic {
        pub severity: Severity,
        pub message: String,
    }

    impl Diagnostic {
        pub fn warning(message: impl Into<String>) -> Self {
            Self {
                severity: Severity::Warning,
                message: message.into(),
            }
        }

        pub fn error(message: impl Into<String>) -> Self {
            Self {
                severity: Severity::Error,
                message: message.into(),
            }
        }
    }

    /// A rule a task failed during validation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    pub enum TaskViolation {
        #[error("Running timer detected")]
        RunningTimer,
        #[error("Nested task detected")]
        NestedTask,
        #[error("No task ID")]
        MissingTaskId,
        #[error("No duration recorded")]
        NoDuration,
        #[error("Invalid format for \"time\" property")]
        InvalidTimeProperty,
    }

    /// Outcome of reconciling one journal. Owns the reconciled tree.
    #[derive(Debug, Clone)]
    pub struct Report {
        journal: Journal,
        task_ids: Vec<BlockId>,
        /// Sum of per-task rounded durations, in seconds.
        pub total_duration: u64,
        /// Rounded switching cost, in seconds.
        pub total_switching_cost: u64,
        /// Warnings and errors in detection order.
        pub log: Vec<Diagnostic>,
    }

    /// Borrowed view of one reconciled task.
    #[derive(Debug, Clone, Copy)]
    pub struct TaskRef<'a> {
        pub id: BlockId,
        pub block: &'a Block,
        pub task: &'a Task,
    }

    impl TaskRef<'_> {
        pub fn duration(&self) -> u64 {
            self.task.total_duration()
        }
    }

    impl Report {
        pub fn journal(&self) -> &Journal {
            &self.journal
        }

        pub fn task_ids(&self) -> &[BlockId] {
            &self.task_ids
        }

        /// Tasks in document order.
        pub fn tasks(&self) -> impl Iterator<Item = TaskRef<'_>> + '_ {
            self.task_ids.iter().filter_map(|&id| {
                let block = self.journal.block(id);
                block.task().map(|task| TaskRef { id, block, task })
            })
        }

        pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
            self.log.iter().filter(|d| d.severity == Severity::Error)
        }

        pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
            self.log.iter().filter(|d| d.severity == Severity::Warning)
        }

        pub fn has_errors(&self) -> bool {
            self.errors().next().is_some()
        }

        /// Serializable snapshot for export.
        pub fn summary(&self) -> ReportSummary<'_> {
            ReportSummary {
                date: self.journal.date(),
                tasks: self
                    .tasks()
                    .map(|t| TaskSummary {
                        task_id: t.task.task_id.as_deref(),
                        keyword: t.task.keyword,
                        description: &t.task.description,
                        content: t.block.content(),
                        duration: t.duration(),
                        properties: t.block.properties(),
                        logbook: &t.task.logbook,
                    })
                    .collect(),
                total_duration: self.total_duration,
                total_switching_cost: self.total_switching_cost,
                log: &self.log,
            }
        }
    }

    #[derive(Debug, Serialize)]
    pub struct ReportSummary<'a> {
        pub date: NaiveDate,
        pub tasks: Vec<TaskSummary<'a>>,
        pub total_duration: u64,
        pub total_switching_cost: u64,
        pub log: &'a [Diagnostic],
    }

    #[derive(Debug, Serialize)]
    pub struct TaskSummary<'a> {
        pub task_id: Option<&'a str>,
        pub keyword: Keyword,
        pub description: &'a str,
        pub content: &'a str,
        pub duration: u64,
        pub properties: &'a IndexMap<String, String>,
        pub logbook: &'a [LogbookEntry],
    }

    /// Every task under the root, depth-first pre-order, including tasks nested in tasks.
    pub fn find_tasks(journal: &Journal) -> Vec<BlockId> {
        journal.tasks().map(|(id, _)| id).collect()
    }

    /// Reconcile a parsed journal, charging `switching_cost` minutes per task.
    pub fn process_tasks(mut journal: Journal, switching_cost: u64) -> Report {
        let mut log = Vec::new();
        let date = journal.date();
        let task_ids = find_tasks(&journal);

        let total_switching_cost = round_duration(
            (task_ids.len() as u64)
                .saturating_mul(switching_cost)
                .saturating_mul(60),
        );
        charge_switching_cost(&mut journal, total_switching_cost, &mut log);

        for &id in &task_ids {
            convert_time_property(&mut journal, id, date);
            for violation in validate(&journal, id) {
                log.push(Diagnostic::error(format!(
                    "{violation} for line \"{}\"",
                    journal.block(id).content()
                )));
            }
        }

        let total_duration = task_ids
            .iter()
            .filter_map(|&id| journal.task(id))
            .map(Task::total_duration)
            .fold(0, u64::saturating_add);

        info!(
            "reconciled {} tasks for {}: {}s logged, {}s switching cost, {} diagnostics",
            task_ids.len(),
            date,
            total_duration,
            total_switching_cost,
            log.len()
        );

        Report {
            journal,
            task_ids,
            total_duration,
            total_switching_cost,
            log,
        }
    }

    fn charge_switching_cost(journal: &mut Journal, cost: u64, log: &mut Vec<Diagnostic>) {
        let date = journal.date();
        let Some(id) = journal.catch_all() else {
            if cost > 0 {
                log.push(Diagnostic::warning(NO_CATCH_ALL));
            }
            return;
        };

        if let Some(task) = journal.task_mut(id) {
            debug!("charging {cost}s switching cost to catch-all block");
            task.add_to_logbook(date, cost);
        } else if cost > 0 {
            log.push(Diagnostic::warning(format!(
                "CATCH-ALL block \"{}\" is not a task. Switching cost not included in total duration.",
                journal.block(id).content()
            )));
        }
    }

    /// Replace a parseable `time::` property with a logbook entry; leave a bad one in place.
    fn convert_time_property(journal: &mut Journal, id: BlockId, date: NaiveDate) {
        let Some(value) = journal.block(id).properties().get(TIME_PROPERTY) else {
            return;
        };

        match parse_free_duration(value) {
            Ok(seconds) => {
                let block = journal.block_mut(id);
                block.remove_property(TIME_PROPERTY);
                if let Some(task) = block.task_mut() {
                    task.add_to_logbook(date, round_duration(seconds));
                }
            }
            Err(err) => debug!("keeping time property on {:?}: {err}", journal.block(id).content()),
        }
    }

    /// All rules the task breaks, in a fixed order.
    pub fn validate(journal: &Journal, id: BlockId) -> Vec<TaskViolation> {
        let mut violations = Vec::new();
        let block = journal.block(id);
        let Some(task) = block.task() else {
            return violations;
        };

        if task.keyword == Keyword::Now {
            violations.push(TaskViolation::RunningTimer);
        }
        if journal.ancestors(id).any(|a| journal.block(a).is_task()) {
            violations.push(TaskViolation::NestedTask);
        }
        if task.task_id.is_none() {
            violations.push(TaskViolation::MissingTaskId);
        }
        if task.logbook.is_empty() {
            violations.push(TaskViolation::NoDuration);
        }
        if block.properties().contains_key(TIME_PROPERTY) {
            violations.push(TaskViolation::InvalidTimeProperty);
        }
        violations
    }

}

pub mod storage {
    //! Locating and reading journal documents inside a Logseq graph directory.

    use crate::core::Journal;
    use crate::parser::parse_journal;
    use anyhow::{Context, Result};
    use chrono::NaiveDate;
    use log::debug;
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    /// `<graph>/journals/YYYY_MM_DD.md`
    pub fn journal_path(graph: &Path, date: NaiveDate) -> PathBuf {
        graph
            .join("journals")
            .join(format!("{}.md", date.format("%Y_%m_%d")))
    }

    /// Supplies the raw lines of a day's journal.
    pub trait JournalSource {
        fn read_lines(&self, date: NaiveDate) -> Result<Vec<String>>;
    }

    /// A graph directory on disk.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GraphDir {
        root: PathBuf,
    }

    impl GraphDir {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }
    }

    impl JournalSource for GraphDir {
        fn read_lines(&self, date: NaiveDate) -> Result<Vec<String>> {
            let path = journal_path(&self.root, date);
            debug!("reading journal {:?}", path);
            let text =
                fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
            Ok(text.lines().map(str::to_string).collect())
        }
    }

    /// Read and parse the journal for `date`.
    pub fn load_journal(source: &dyn JournalSource, date: NaiveDate) -> Result<Journal> {
        let lines = source.read_lines(date)?;
        parse_journal(date, &lines).with_context(|| format!("parsing journal for {date}"))
    }

}

pub mod config {
    //! Optional TOML configuration.

    use anyhow::{Context, Result};
    use directories::ProjectDirs;
    use serde::{Deserialize, Serialize};
    use std::{
        env, fs,
        path::{Path, PathBuf},
    };

    /// Overrides the config file location.
    pub const CONFIG_ENV: &str = "WORKLOG_CONFIG";

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Config {
        /// Logseq graph directory containing `journals/`.
        #[serde(default)]
        pub graph_path: Option<PathBuf>,
        /// Minutes charged per task for context switching.
        #[serde(default)]
        pub switching_cost: u64,
    }

    impl Config {
        /// `$WORKLOG_CONFIG`, else `<platform config dir>/worklog/config.toml`.
        pub fn default_path() -> Option<PathBuf> {
            if let Some(path) = env::var_os(CONFIG_ENV) {
                return Some(PathBuf::from(path));
            }
            ProjectDirs::from("", "", "worklog").map(|dirs| dirs.config_dir().join("config.toml"))
        }

        /// Load from `path`; a missing file yields the defaults.
        pub fn load(path: &Path) -> Result<Self> {
            if !path.exists() {
                return Ok(Self::default());
            }
            let text =
                fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
            Self::from_toml(&text).with_context(|| format!("parsing config {:?}", path))
        }

        pub fn from_toml(text: &str) -> Result<Self> {
            Ok(toml::from_str(text)?)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_all_fields() {
            let config =
                Config::from_toml("graph_path = \"/home/me/graph\"\nswitching_cost = 5\n").unwrap();
            assert_eq!(config.graph_path, Some(PathBuf::from("/home/me/graph")));
            assert_eq!(config.switching_cost, 5);
        }

        #[test]
        fn empty_file_is_default() {
            assert_eq!(Config::from_toml("").unwrap(), Config::default());
        }

        #[test]
        fn missing_file_is_default_and_bad_file_errors() {
            let tmp = tempfile::tempdir().expect("tempdir");
            let path = tmp.path().join("config.toml");
            assert_eq!(Config::load(&path).unwrap(), Config::default());

            fs::write(&path, "switching_cost = \"lots\"").expect("write");
            let err = Config::load(&path).unwrap_err();
            assert!(format!("{err:#}").contains("parsing config"));
        }
    }
}

pub use self::core::{Block, BlockId, BlockKind, Journal, Keyword, LogbookEntry, ParseError, Task};
pub use parser::{parse_journal, parse_journal_str};
pub use reconcile::{Diagnostic, Report, Severity, process_tasks};
