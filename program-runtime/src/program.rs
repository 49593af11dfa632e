//! Program loading and bracket diagnostics
//!
//! Loading never rejects a program. Every source character becomes exactly
//! one [`Instruction`], so instruction positions are character positions.
//! Bracket problems are only reported, the VM decides what to do with them
//! when (and if) execution reaches them.

use std::fmt;

/// A decoded source character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// `.`
    Output,
    /// `,`
    Input,
    /// Any other character
    Nop,
}

impl From<char> for Instruction {
    fn from(c: char) -> Self {
        match c {
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '>' => Instruction::MoveRight,
            '<' => Instruction::MoveLeft,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            _ => Instruction::Nop,
        }
    }
}

/// A loaded program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Load a program from raw source text
    pub fn load(source: &str) -> Self {
        Self {
            instructions: source.chars().map(Instruction::from).collect(),
        }
    }

    /// Number of instructions (source characters)
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions at all
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `position`, if within bounds
    pub fn get(&self, position: usize) -> Option<Instruction> {
        self.instructions.get(position).copied()
    }

    /// Scan the bracket structure without executing anything
    pub fn diagnose(&self) -> Diagnostics {
        let mut open = Vec::new();
        let mut unmatched_ends = Vec::new();
        let mut max_depth = 0;

        for (position, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                Instruction::LoopStart => {
                    open.push(position);
                    max_depth = max_depth.max(open.len());
                }
                Instruction::LoopEnd => {
                    if open.pop().is_none() {
                        unmatched_ends.push(position);
                    }
                }
                _ => {}
            }
        }

        Diagnostics {
            unmatched_starts: open,
            unmatched_ends,
            max_depth,
        }
    }
}

/// Static bracket report for a [`Program`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Positions of `[` never closed
    pub unmatched_starts: Vec<usize>,
    /// Positions of `]` with nothing to close
    pub unmatched_ends: Vec<usize>,
    /// Deepest static loop nesting
    pub max_depth: usize,
}

impl Diagnostics {
    /// True when every bracket has a partner
    pub fn is_balanced(&self) -> bool {
        self.unmatched_starts.is_empty() && self.unmatched_ends.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_balanced() {
            return write!(f, "balanced, max depth {}", self.max_depth);
        }
        write!(
            f,
            "unmatched '[' at {:?}, unmatched ']' at {:?}, max depth {}",
            self.unmatched_starts, self.unmatched_ends, self.max_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_keeps_positions() {
        let program = Program::load("a+b]");
        assert_eq!(program.len(), 4);
        assert_eq!(program.get(0), Some(Instruction::Nop));
        assert_eq!(program.get(1), Some(Instruction::Increment));
        assert_eq!(program.get(3), Some(Instruction::LoopEnd));
        assert_eq!(program.get(4), None);
    }

    #[test]
    fn test_load_multibyte_characters() {
        // Positions count characters, not bytes
        let program = Program::load("é+");
        assert_eq!(program.len(), 2);
        assert_eq!(program.get(1), Some(Instruction::Increment));
    }

    #[test]
    fn test_empty_program() {
        let program = Program::load("");
        assert!(program.is_empty());
        assert!(program.diagnose().is_balanced());
    }

    #[test]
    fn test_diagnose_balanced() {
        let diagnostics = Program::load("+[>[-]<-]").diagnose();
        assert!(diagnostics.is_balanced());
        assert_eq!(diagnostics.max_depth, 2);
    }

    #[test]
    fn test_diagnose_unbalanced() {
        let diagnostics = Program::load("][[]").diagnose();
        assert!(!diagnostics.is_balanced());
        assert_eq!(diagnostics.unmatched_ends, vec![0]);
        assert_eq!(diagnostics.unmatched_starts, vec![1]);
        assert_eq!(
            diagnostics.to_string(),
            "unmatched '[' at [1], unmatched ']' at [0], max depth 2"
        );
    }
}
