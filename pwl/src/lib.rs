/*! Personal word list spell-checking and correction.

A personal word list is a user-maintained dictionary that can check words
for membership, suggest corrections for misspelt words, and persist itself
to a line-oriented text file across process lifetimes.

Under the hood the word list is stored as a prefix-compressed trie over
Unicode scalar values. Checking strings for correctness and making
suggestions is done by traversing the trie while allowing a bounded number
of mis-steps, which enumerates every stored word within a small edit
distance of the query quite efficiently.

# Usage example

```
use pwl::speller::PersonalWordList;

let mut words = PersonalWordList::new();
words.add("hello");
assert!(words.check("hello"));

let suggestions = words.suggest("helo");
assert_eq!(suggestions[0].value(), "hello");
```

Binding the list to a file keeps it in sync with other writers:

```no_run
use pwl::speller::PersonalWordList;

let mut words = PersonalWordList::with_file("en_US.dic")?;
words.add("quokka");
# Ok::<(), pwl::error::WordListError>(())
```
*/

#![warn(missing_docs)]

pub mod case_handling;
pub mod distance;
pub mod error;
pub mod speller;

pub(crate) mod constants;
mod trie;
mod wordlist;
