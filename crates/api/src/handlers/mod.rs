pub mod thesaurus;
