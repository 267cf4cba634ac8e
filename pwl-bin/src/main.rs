use std::io::{self, Read};
use std::path::PathBuf;

use gumdrop::Options;
use serde::Serialize;

use pwl::speller::suggestion::Suggestion;
use pwl::speller::PersonalWordList;

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        for sugg in suggestions {
            println!("{}\t\t{}", sugg.value(), sugg.distance());
        }
        println!();
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonWriter {
    suggest: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { suggest: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.suggest.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        let i = self.suggest.len() - 1;
        self.suggest[i].suggestions = suggestions.to_vec();
    }

    fn finish(&mut self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap());
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "check whether words are in the list")]
    Check(CheckArgs),

    #[options(help = "get suggestions for provided input")]
    Suggest(SuggestArgs),

    #[options(help = "add words to the list")]
    Add(EditArgs),

    #[options(help = "remove words from the list")]
    Remove(EditArgs),
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "word list file to be used", required)]
    file: PathBuf,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "word list file to be used", required)]
    file: PathBuf,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(help = "baseline suggestion capping the search radius (repeatable)")]
    baseline: Vec<String>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct EditArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "word list file to be used", required)]
    file: PathBuf,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

fn words_or_stdin(inputs: Vec<String>) -> Vec<String> {
    if inputs.is_empty() {
        eprintln!("Reading from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("reading stdin");
        buffer
            .trim()
            .split('\n')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    } else {
        inputs
    }
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let mut words = PersonalWordList::with_file(&args.file)?;
    let mut writer = StdoutWriter;

    for word in words_or_stdin(args.inputs) {
        let is_correct = words.check(&word);
        writer.write_correction(&word, is_correct);
    }

    writer.finish();
    Ok(())
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut words = PersonalWordList::with_file(&args.file)?;
    let baseline: Vec<&str> = args.baseline.iter().map(|x| x.as_str()).collect();

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    for word in words_or_stdin(args.inputs) {
        let is_correct = words.check(&word);
        writer.write_correction(&word, is_correct);

        if args.always_suggest || !is_correct {
            let suggestions = if baseline.is_empty() {
                words.suggest(&word)
            } else {
                words.suggest_with_baseline(&word, &baseline)
            };
            writer.write_suggestions(&word, &suggestions);
        }
    }

    writer.finish();
    Ok(())
}

fn add(args: EditArgs) -> anyhow::Result<()> {
    let mut words = PersonalWordList::with_file(&args.file)?;
    for word in words_or_stdin(args.inputs) {
        words.add(&word);
    }
    Ok(())
}

fn remove(args: EditArgs) -> anyhow::Result<()> {
    let mut words = PersonalWordList::with_file(&args.file)?;
    for word in words_or_stdin(args.inputs) {
        words.remove(&word);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Check(args)) => check(args),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Add(args)) => add(args),
        Some(Command::Remove(args)) => remove(args),
    }
}
