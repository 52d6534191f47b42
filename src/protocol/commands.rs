// Command enum to represent control-connection commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Get(String),
    Invalid,
}
