use clap::{Parser, Subcommand, ValueEnum};
use fortran_interop::logging::{LogFormat, LogLevel, LogOptions, init_logging};
use fortran_interop::native::NATIVE_BACKEND;
use fortran_interop::{Binding, ENTRY_POINTS, InteropError, InteropRecord};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "fortran-interop", about = "Call the interop Fortran module from Rust")]
struct Cli {
    /// Print one JSON object per result instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BindingArg {
    Module,
    IsoC,
    Both,
}

impl BindingArg {
    fn bindings(self) -> &'static [Binding] {
        match self {
            BindingArg::Module => &[Binding::Module],
            BindingArg::IsoC => &[Binding::IsoC],
            BindingArg::Both => &Binding::ALL,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Walk through the scalar routines with a fixed value.
    Demo {
        #[arg(default_value_t = 5, allow_negative_numbers = true)]
        value: i32,
    },
    /// Pass an integer through `return_integer`.
    ReturnInteger {
        #[arg(allow_negative_numbers = true)]
        value: i32,
        #[arg(long, value_enum, default_value_t = BindingArg::Both)]
        binding: BindingArg,
    },
    /// Copy an integer over a destination with `copy_integer`.
    CopyInteger {
        #[arg(allow_negative_numbers = true)]
        source: i32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        destination: i32,
        #[arg(long, value_enum, default_value_t = BindingArg::Both)]
        binding: BindingArg,
    },
    /// Pass a double through `return_double`.
    ReturnDouble {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, value_enum, default_value_t = BindingArg::Both)]
        binding: BindingArg,
    },
    /// Sum values with `sum_array`.
    Sum {
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
        #[arg(long, value_enum, default_value_t = BindingArg::Both)]
        binding: BindingArg,
    },
    /// Rotate packed x y z triples about the Z axis.
    Rotate {
        #[arg(long, allow_negative_numbers = true)]
        angle: f64,
        #[arg(allow_negative_numbers = true)]
        components: Vec<f64>,
        #[arg(long, value_enum, default_value_t = BindingArg::Module)]
        binding: BindingArg,
    },
    /// Exercise the string routines.
    Text {
        #[arg(default_value = "Test")]
        input: String,
        #[arg(long, default_value_t = 20)]
        capacity: usize,
    },
    /// Exercise the derived-type routines.
    Record {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        change: f64,
    },
    /// Report progress through `callback_example`.
    Progress {
        #[arg(long, default_value_t = 10)]
        total: i32,
        #[arg(long, default_value_t = 1)]
        step: i32,
        #[arg(long, value_enum, default_value_t = BindingArg::Module)]
        binding: BindingArg,
    },
    /// List the native symbols this build links against.
    Symbols,
}

struct Printer {
    json: bool,
    emitted: RefCell<Vec<Value>>,
}

impl Printer {
    fn new(json: bool) -> Self {
        Self {
            json,
            emitted: RefCell::new(Vec::new()),
        }
    }

    fn emit(&self, line: impl AsRef<str>, value: Value) {
        if self.json {
            println!("{value}");
        } else {
            println!("{}", line.as_ref());
        }
        self.emitted.borrow_mut().push(value);
    }
}

/// JSON has no infinities or NaN; those are written as their Rust spelling.
fn json_f64(value: f64) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::String(format!("{value:?}"))
    }
}

fn json_f64s(values: &[f64]) -> Value {
    Value::Array(values.iter().copied().map(json_f64).collect())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LogOptions {
        level: cli.log_level,
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        },
    });
    info!(backend = NATIVE_BACKEND, "native module linked");

    let printer = Printer::new(cli.json);
    let command = cli.command.unwrap_or(Command::Demo { value: 5 });
    match run(&printer, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "call rejected");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(printer: &Printer, command: Command) -> fortran_interop::Result<()> {
    match command {
        Command::Demo { value } => {
            // The native convention needs the value by address; the wrappers
            // take it by value and handle that.
            let result = fortran_interop::return_integer(value);
            printer.emit(
                format!("Fortran returned value: {result}"),
                json!({ "operation": "return_integer", "binding": "module", "input": value, "result": result }),
            );
            let result = fortran_interop::return_integer_iso_c(value);
            printer.emit(
                format!("Fortran returned value using ISO C: {result}"),
                json!({ "operation": "return_integer", "binding": "iso-c", "input": value, "result": result }),
            );
            let mut destination = 0;
            fortran_interop::copy_integer(value, &mut destination);
            printer.emit(
                format!("Fortran copied value: {destination}"),
                json!({ "operation": "copy_integer", "binding": "module", "input": value, "result": destination }),
            );
            let input = f64::from(value) / 3.0;
            let result = fortran_interop::return_double(input);
            printer.emit(
                format!("Fortran returned double: {result}"),
                json!({ "operation": "return_double", "binding": "module", "input": json_f64(input), "result": json_f64(result) }),
            );
        }
        Command::ReturnInteger { value, binding } => {
            for &binding in binding.bindings() {
                let result = fortran_interop::return_integer_with(binding, value);
                printer.emit(
                    format!("return_integer [{binding}] {value} -> {result}"),
                    json!({ "operation": "return_integer", "binding": binding.as_str(), "input": value, "result": result }),
                );
            }
        }
        Command::CopyInteger {
            source,
            destination,
            binding,
        } => {
            for &binding in binding.bindings() {
                let mut target = destination;
                fortran_interop::copy_integer_with(binding, source, &mut target);
                printer.emit(
                    format!("copy_integer [{binding}] {source} over {destination} -> {target}"),
                    json!({ "operation": "copy_integer", "binding": binding.as_str(), "input": source, "prior": destination, "result": target }),
                );
            }
        }
        Command::ReturnDouble { value, binding } => {
            for &binding in binding.bindings() {
                let result = fortran_interop::return_double_with(binding, value);
                printer.emit(
                    format!("return_double [{binding}] {value:?} -> {result:?}"),
                    json!({
                        "operation": "return_double",
                        "binding": binding.as_str(),
                        "input": json_f64(value),
                        "input_bits": format!("{:#018x}", value.to_bits()),
                        "result": json_f64(result),
                        "result_bits": format!("{:#018x}", result.to_bits()),
                        "bits_equal": result.to_bits() == value.to_bits(),
                    }),
                );
            }
        }
        Command::Sum { values, binding } => {
            for &binding in binding.bindings() {
                let result = fortran_interop::sum_array_with(binding, &values)?;
                printer.emit(
                    format!("sum_array [{binding}] {} values -> {result}", values.len()),
                    json!({ "operation": "sum_array", "binding": binding.as_str(), "input": json_f64s(&values), "result": json_f64(result) }),
                );
            }
        }
        Command::Rotate {
            angle,
            components,
            binding,
        } => {
            let vectors = pack_vectors(&components)?;
            for &binding in binding.bindings() {
                let mut rotated = vectors.clone();
                fortran_interop::rotate_vectors_with(binding, &mut rotated, angle)?;
                let line = rotated
                    .iter()
                    .map(|[x, y, z]| format!("({x}, {y}, {z})"))
                    .collect::<Vec<_>>()
                    .join(" ");
                printer.emit(
                    format!("rotate_vectors [{binding}] {angle} rad -> {line}"),
                    json!({ "operation": "rotate_vectors", "binding": binding.as_str(), "angle": json_f64(angle), "result": rotated.iter().map(|v| json_f64s(v)).collect::<Vec<_>>() }),
                );
            }
        }
        Command::Text { input, capacity } => {
            // A fixed-width rejection is reported; the variable-length call still runs.
            let (fixed_line, fixed_json) = match fortran_interop::string_input_fixed(&input) {
                Ok(status) => (status.to_string(), json!(status.as_raw())),
                Err(err) => {
                    warn!(%err, "fixed-width input rejected");
                    (format!("rejected ({err})"), json!({ "error": err.to_string() }))
                }
            };
            let variable = fortran_interop::string_input(&input)?;
            printer.emit(
                format!("string_input {input:?}: fixed {fixed_line}, variable {variable}"),
                json!({ "operation": "string_input", "input": input, "fixed": fixed_json, "variable": variable.as_raw() }),
            );
            let fixed = fortran_interop::string_output_fixed();
            let variable = fortran_interop::string_output(capacity)?;
            printer.emit(
                format!("string_output: fixed {fixed:?}, variable {variable:?}"),
                json!({ "operation": "string_output", "fixed": fixed, "variable": variable }),
            );
        }
        Command::Record { change } => {
            let mut record = fortran_interop::return_record();
            printer.emit(
                format!("return_structure: id {} name {:?}", record.id, record.name()),
                json!({ "operation": "return_structure", "id": record.id, "name": record.name(), "values": json_f64s(&record.values) }),
            );
            let sum = fortran_interop::pass_record(&record, 0.0);
            printer.emit(
                format!("pass_structure: {sum}"),
                json!({ "operation": "pass_structure", "result": json_f64(sum) }),
            );
            fortran_interop::modify_record(&mut record, change);
            printer.emit(
                format!("modify_structure (+{change}): {:?}", record.values),
                json!({ "operation": "modify_structure", "change": json_f64(change), "values": json_f64s(&record.values) }),
            );
            describe_record(&record);
        }
        Command::Progress {
            total,
            step,
            binding,
        } => {
            for &binding in binding.bindings() {
                let mut seen = Vec::new();
                fortran_interop::callback_example_with(binding, total, step, |progress| {
                    seen.push(progress)
                });
                printer.emit(
                    format!("callback_example [{binding}] {seen:?}"),
                    json!({ "operation": "callback_example", "binding": binding.as_str(), "total": total, "step": step, "progress": seen }),
                );
            }
        }
        Command::Symbols => {
            for entry in ENTRY_POINTS {
                printer.emit(
                    entry.to_string(),
                    json!({ "symbol": entry.symbol, "binding": entry.binding.as_str(), "procedure": entry.procedure() }),
                );
            }
        }
    }
    Ok(())
}

fn pack_vectors(components: &[f64]) -> fortran_interop::Result<Vec<[f64; 3]>> {
    if components.len() % 3 != 0 {
        return Err(InteropError::IncompleteVector {
            components: components.len(),
            leftover: components.len() % 3,
        });
    }
    Ok(components
        .chunks_exact(3)
        .map(|chunk| [chunk[0], chunk[1], chunk[2]])
        .collect())
}

fn describe_record(record: &InteropRecord) {
    info!(id = record.id, sum = record.values_sum(), "record after modification");
}
