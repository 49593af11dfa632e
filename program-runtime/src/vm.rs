//! Tape VM implementation

use crate::{
    clock::{Clock, MonotonicClock},
    config::VmConfig,
    error::{ProgramError, Result, TapeVmError},
    program::{Instruction, Program},
    result::{RunResult, RunStatus},
    run_context::RunContext,
};

/// Tape Virtual Machine
///
/// This is the main entry point for executing tape programs. It owns the
/// loaded program and the run context; [`TapeVm::run`] consumes it and
/// returns the result, so every run starts from a fresh tape.
///
/// # Example
///
/// ```
/// use tapevm_runtime::TapeVm;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Allow the program one second
/// let vm = TapeVm::new("++++++++[>++++++++<-]>.", 1_000)?;
///
/// let result = vm.run();
/// assert!(result.is_completed());
/// assert_eq!(result.output(), "@");
/// println!("{}", result);
/// # Ok(())
/// # }
/// ```
pub struct TapeVm<C: Clock = MonotonicClock> {
    /// The loaded program
    program: Program,

    /// Execution context
    context: RunContext<C>,

    /// Loop stack limit
    max_loop_depth: usize,

    /// Output limit in characters, unbounded when `None`
    max_output: Option<usize>,
}

impl TapeVm<MonotonicClock> {
    /// Number of cells on the tape
    pub const TAPE_LENGTH: usize = 30_000;

    /// Default loop nesting limit
    pub const DEFAULT_MAX_LOOP_DEPTH: usize = 16;

    /// Largest loop nesting limit a config may ask for
    pub const MAX_LOOP_DEPTH: usize = 4_096;

    /// Creates a VM measured with the wall clock
    ///
    /// # Arguments
    /// - `source`: Raw program text, taken as is
    /// - `timeout_ms`: Time budget in milliseconds
    ///
    /// # Returns
    /// - `Ok(TapeVm)` for any source text
    /// - `Err(TapeVmError)` if the timeout is zero
    pub fn new(source: &str, timeout_ms: u64) -> Result<Self> {
        Ok(Self::with_context(source, RunContext::new(timeout_ms)?))
    }

    /// Creates a VM from a loaded config
    pub fn from_config(source: &str, config: &VmConfig) -> Result<Self> {
        config.validate()?;
        let mut vm = Self::new(source, config.timeout)?;
        vm.max_loop_depth = config.max_loop_depth;
        vm.max_output = config.max_output;
        Ok(vm)
    }
}

impl<C: Clock> TapeVm<C> {
    /// Creates a VM around an existing context
    pub fn with_context(source: &str, context: RunContext<C>) -> Self {
        let program = Program::load(source);

        if log::log_enabled!(log::Level::Debug) {
            let diagnostics = program.diagnose();
            if !diagnostics.is_balanced() {
                log::debug!("Loaded unbalanced program: {}", diagnostics);
            }
        }

        Self {
            program,
            context,
            max_loop_depth: TapeVm::DEFAULT_MAX_LOOP_DEPTH,
            max_output: None,
        }
    }

    /// Change the loop nesting limit
    pub fn set_max_loop_depth(&mut self, depth: usize) -> Result<()> {
        if depth == 0 || depth > TapeVm::MAX_LOOP_DEPTH {
            return Err(TapeVmError::InvalidLoopDepth {
                depth,
                max: TapeVm::MAX_LOOP_DEPTH,
            });
        }
        self.max_loop_depth = depth;
        Ok(())
    }

    /// Cap the output at `limit` characters; `None` removes the cap
    pub fn set_max_output(&mut self, limit: Option<usize>) {
        self.max_output = limit;
    }

    /// Queue input characters for `,`
    pub fn push_input(&mut self, text: &str) {
        self.context.push_input(text);
    }

    /// Enable debug mode (logs faults)
    pub fn enable_debug(&mut self) {
        self.context.enable_debug();
    }

    /// Execute the program
    ///
    /// The budget starts counting here, not when the VM was built. It is
    /// checked at the start of every dispatch, before the instruction runs.
    /// Running off the end of the program completes the run; a fault stops
    /// it and keeps the state reached so far.
    pub fn run(mut self) -> RunResult {
        let mut machine = Machine::new(self.max_loop_depth);
        machine.max_output = self.max_output;
        let mut position = 0usize;
        let mut executed = 0u64;

        self.context.start();
        let status = loop {
            let Some(instruction) = self.program.get(position) else {
                break RunStatus::Completed;
            };
            if self.context.is_expired() {
                break RunStatus::TimedOut;
            }
            match machine.step(position, instruction, &mut self.context) {
                Ok(next) => position = next,
                Err(fault) => break RunStatus::Faulted(fault),
            }
            executed = executed.saturating_add(1);
        };

        if let RunStatus::Faulted(fault) = &status {
            if self.context.debug_mode {
                log::warn!("Program faulted after {} instructions: {}", executed, fault);
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Execution finished: {} instructions, status = {}",
                executed,
                status.tag()
            );
        }

        let elapsed = self.context.elapsed();
        let (tape, output) = machine.into_parts();
        RunResult::new(status, tape, output, executed, elapsed)
    }
}

/// Run `source` once with a wall-clock budget of `timeout_ms`
pub fn run(source: &str, timeout_ms: u64) -> Result<RunResult> {
    Ok(TapeVm::new(source, timeout_ms)?.run())
}

/// Mutable state of one run
struct Machine {
    tape: Vec<i64>,
    data_pointer: usize,
    high_water_mark: usize,
    loop_stack: Vec<usize>,
    max_loop_depth: usize,
    output: String,
    output_chars: usize,
    max_output: Option<usize>,
}

impl Machine {
    fn new(max_loop_depth: usize) -> Self {
        Self {
            tape: vec![0; TapeVm::TAPE_LENGTH],
            data_pointer: 0,
            high_water_mark: 0,
            loop_stack: Vec::new(),
            max_loop_depth,
            output: String::new(),
            output_chars: 0,
            max_output: None,
        }
    }

    /// Execute one instruction, returning the next position
    fn step<C: Clock>(
        &mut self,
        position: usize,
        instruction: Instruction,
        context: &mut RunContext<C>,
    ) -> std::result::Result<usize, ProgramError> {
        let next = position.saturating_add(1);
        let cell = self.data_pointer;

        match instruction {
            Instruction::Increment => {
                self.tape[cell] = self.tape[cell]
                    .checked_add(1)
                    .ok_or(ProgramError::CellOverflow { position, cell })?;
            }
            Instruction::Decrement => {
                self.tape[cell] = self.tape[cell]
                    .checked_sub(1)
                    .ok_or(ProgramError::CellOverflow { position, cell })?;
            }
            Instruction::MoveRight => {
                let moved = cell.saturating_add(1);
                if moved >= self.tape.len() {
                    return Err(ProgramError::PointerOutOfBounds {
                        position,
                        last: cell,
                    });
                }
                self.data_pointer = moved;
                self.high_water_mark = self.high_water_mark.max(moved);
            }
            Instruction::MoveLeft => {
                self.data_pointer = cell.saturating_sub(1);
            }
            Instruction::LoopStart => {
                if self.loop_stack.len() >= self.max_loop_depth {
                    return Err(ProgramError::LoopStackOverflow {
                        position,
                        max_depth: self.max_loop_depth,
                    });
                }
                self.loop_stack.push(position);
            }
            Instruction::LoopEnd => {
                let start = *self
                    .loop_stack
                    .last()
                    .ok_or(ProgramError::UnmatchedLoopEnd { position })?;
                if self.tape[cell] == 0 {
                    self.loop_stack.pop();
                } else {
                    // Resume right after the `[`, keeping its stack slot
                    return Ok(start.saturating_add(1));
                }
            }
            Instruction::Output => {
                let value = self.tape[cell];
                let c = u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(ProgramError::InvalidCharacter { position, value })?;
                if let Some(limit) = self.max_output {
                    if self.output_chars >= limit {
                        return Err(ProgramError::OutputLimitExceeded { position, limit });
                    }
                }
                self.output.push(c);
                self.output_chars = self.output_chars.saturating_add(1);
            }
            Instruction::Input => {
                if let Some(c) = context.read_input() {
                    self.tape[cell] = i64::from(u32::from(c));
                }
            }
            Instruction::Nop => {}
        }

        Ok(next)
    }

    fn into_parts(mut self) -> (Vec<i64>, String) {
        self.tape.truncate(self.high_water_mark.saturating_add(1));
        (self.tape, self.output)
    }
}
