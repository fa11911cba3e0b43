#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct TypeGrammar;
