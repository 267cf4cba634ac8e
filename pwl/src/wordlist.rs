//! Line-oriented backing file for a personal word list.
//!
//! One word per line, UTF-8, `\n` terminated. An optional BOM as the first
//! code point is skipped on load and preserved on rewrite; blank lines and
//! lines starting with `#` are comments. Reads and writes are bracketed by
//! advisory file locks so no partial read overlaps another writer's append.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::constants::MAX_LINE_LEN;
use crate::error::WordListError;

/// UTF-8 encoding of U+FEFF.
const BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug)]
pub(crate) struct WordListFile {
    path: PathBuf,
    last_mtime: Option<SystemTime>,
}

impl WordListFile {
    /// Binds to `path`, creating the file when it does not exist.
    pub(crate) fn open_or_create(path: &Path) -> Result<WordListFile, WordListError> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(WordListError::File)?;
        Ok(WordListFile {
            path: path.to_path_buf(),
            last_mtime: None,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file changed since it was last streamed.
    pub(crate) fn has_changed(&self) -> bool {
        match self.mtime() {
            Some(mtime) => self.last_mtime != Some(mtime),
            // Presumably reading would fail as well; keep what we have.
            None => false,
        }
    }

    /// Streams the stored words into `visit` and records the file mtime.
    /// Comment lines and malformed lines are skipped, the latter with a
    /// warning.
    pub(crate) fn load(&mut self, visit: &mut dyn FnMut(&str)) {
        let mtime = match self.mtime() {
            Some(mtime) => mtime,
            None => return,
        };
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("cannot read {}: {}", self.path.display(), err);
                return;
            }
        };
        self.last_mtime = Some(mtime);

        let _lock = FileLock::shared(&file, &self.path);
        let mut reader = BufReader::new(&file);
        let mut line = Vec::new();

        for line_number in 1usize.. {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    log::warn!(
                        "read error in {} at line {}: {}",
                        self.path.display(),
                        line_number,
                        err
                    );
                    break;
                }
            }

            let mut bytes = line.as_slice();
            if line_number == 1 && bytes.starts_with(BOM) {
                bytes = &bytes[BOM.len()..];
            }
            if bytes.len() > MAX_LINE_LEN {
                log::warn!(
                    "line too long (ignored) in {} at line {}",
                    self.path.display(),
                    line_number
                );
                continue;
            }
            let text = match std::str::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    log::warn!(
                        "bad UTF-8 sequence in {} at line {}",
                        self.path.display(),
                        line_number
                    );
                    continue;
                }
            };

            let word = text.trim_end();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            visit(word);
        }
    }

    /// Appends `word` as a line of its own, making sure the preceding
    /// content ends with a newline first, then re-reads the file mtime.
    pub(crate) fn append_word(&mut self, word: &str) -> io::Result<()> {
        let file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        let _lock = FileLock::exclusive(&file, &self.path);
        let mut writer = &file;

        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            writer.seek(SeekFrom::End(-1))?;
            writer.read_exact(&mut last)?;
            if last[0] != b'\n' {
                writer.write_all(b"\n")?;
            }
        }
        writer.write_all(word.as_bytes())?;
        writer.write_all(b"\n")?;

        self.last_mtime = self.mtime();
        Ok(())
    }

    /// Rewrites the file without any whole-line occurrence of `word`, then
    /// re-reads the file mtime. The contents are read back and rewritten
    /// under one exclusive lock so a concurrent append cannot be lost.
    pub(crate) fn remove_word(&mut self, word: &str) -> io::Result<()> {
        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let _lock = FileLock::exclusive(&file, &self.path);
        let mut handle = &file;

        let mut contents = Vec::new();
        handle.read_to_end(&mut contents)?;
        let stripped = strip_word_lines(&contents, word.as_bytes());

        file.set_len(0)?;
        handle.seek(SeekFrom::Start(0))?;
        handle.write_all(&stripped)?;

        self.last_mtime = self.mtime();
        Ok(())
    }

    fn mtime(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok()
    }
}

/// Advisory lock released on drop. Acquisition failure is logged, not
/// fatal: the discipline only has to keep cooperating processes honest.
struct FileLock<'a> {
    file: &'a File,
}

impl<'a> FileLock<'a> {
    fn shared(file: &'a File, path: &Path) -> FileLock<'a> {
        if let Err(err) = fs2::FileExt::lock_shared(file) {
            log::warn!("cannot lock {}: {}", path.display(), err);
        }
        FileLock { file }
    }

    fn exclusive(file: &'a File, path: &Path) -> FileLock<'a> {
        if let Err(err) = fs2::FileExt::lock_exclusive(file) {
            log::warn!("cannot lock {}: {}", path.display(), err);
        }
        FileLock { file }
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(self.file);
    }
}

/// Drops every whole-line occurrence of `word` from `contents`. Line
/// boundaries are `\n` or `\r`; a leading BOM is preserved, and partial-line
/// near-matches are copied through verbatim.
fn strip_word_lines(contents: &[u8], word: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(contents.len());
    let mut body = contents;
    if body.starts_with(BOM) {
        out.extend_from_slice(BOM);
        body = &body[BOM.len()..];
    }
    if word.is_empty() {
        out.extend_from_slice(body);
        return out;
    }

    let mut search = 0;
    while let Some(offset) = find(&body[search..], word) {
        let needle = search + offset;
        let end = needle + word.len();
        let at_line_start = needle == 0 || body[needle - 1] == b'\n' || body[needle - 1] == b'\r';
        let at_line_end = end == body.len() || body[end] == b'\n' || body[end] == b'\r';

        if at_line_start && at_line_end {
            out.extend_from_slice(&body[search..needle]);
            search = end;
            while search < body.len() && (body[search] == b'\n' || body[search] == b'\r') {
                search += 1;
            }
        } else {
            // Near-match inside a longer line: keep it, emitting up to and
            // including its first byte before searching on.
            out.extend_from_slice(&body[search..=needle]);
            search = needle + 1;
        }
    }
    out.extend_from_slice(&body[search..]);
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
