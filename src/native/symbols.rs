//! Descriptor table of the native entry points
//!
//! The symbol table is the wire format of the boundary. `ENTRY_POINTS`
//! records it as data so the declarations in `ffi.rs` can be checked against
//! it and so callers can list what the linked module must export.

use std::fmt;

/// Name of the Fortran module that owns the module procedures.
pub const NATIVE_MODULE: &str = "interop";

/// Revision of the symbol table below. Bump on any name or signature change.
pub const SYMBOL_TABLE_VERSION: u32 = 1;

/// Export convention of a native entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Module procedure under gfortran's mangling: `__<module>_MOD_<name>`.
    Module,
    /// `bind(c)` export with a plain, unmangled name.
    IsoC,
}

impl Binding {
    pub const ALL: [Binding; 2] = [Binding::Module, Binding::IsoC];

    pub fn as_str(self) -> &'static str {
        match self {
            Binding::Module => "module",
            Binding::IsoC => "iso-c",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passing {
    /// Address of caller storage; the callee may read and write it.
    ByAddress,
    /// Plain value (Fortran `value` attribute).
    ByValue,
}

/// Native type carried by a parameter or return slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    Int,
    Double,
    DoubleArray,
    CharArray,
    Record,
    Callback,
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NativeType::Int => "int",
            NativeType::Double => "double",
            NativeType::DoubleArray => "double[]",
            NativeType::CharArray => "char[]",
            NativeType::Record => "record",
            NativeType::Callback => "callback",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: NativeType,
    pub passing: Passing,
}

const fn by_address(name: &'static str, ty: NativeType) -> Param {
    Param {
        name,
        ty,
        passing: Passing::ByAddress,
    }
}

const fn by_value(name: &'static str, ty: NativeType) -> Param {
    Param {
        name,
        ty,
        passing: Passing::ByValue,
    }
}

/// One native entry point: symbol, convention, parameters, return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    pub symbol: &'static str,
    pub binding: Binding,
    pub params: &'static [Param],
    pub returns: Option<NativeType>,
}

impl EntryPoint {
    /// Procedure name with the binding's decoration stripped.
    pub fn procedure(&self) -> &'static str {
        match self.binding {
            Binding::Module => self
                .symbol
                .rsplit_once("_MOD_")
                .map_or(self.symbol, |(_, name)| name),
            Binding::IsoC => self.symbol.strip_suffix("_c").unwrap_or(self.symbol),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.symbol)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let marker = match param.passing {
                Passing::ByAddress => "*",
                Passing::ByValue => "",
            };
            write!(f, "{}: {}{}", param.name, marker, param.ty)?;
        }
        f.write_str(")")?;
        if let Some(ty) = self.returns {
            write!(f, " -> {ty}")?;
        }
        Ok(())
    }
}

/// Symbol gfortran emits for procedure `name` in module `module`.
pub fn module_symbol(module: &str, name: &str) -> String {
    format!("__{module}_MOD_{name}")
}

/// Symbol of the `bind(c)` twin of procedure `name`.
pub fn iso_c_symbol(name: &str) -> String {
    format!("{name}_c")
}

/// Look up an entry point by its exact symbol name.
pub fn find(symbol: &str) -> Option<&'static EntryPoint> {
    ENTRY_POINTS.iter().find(|entry| entry.symbol == symbol)
}

use NativeType::*;

const INT_IN: &[Param] = &[by_address("value", Int)];
const DOUBLE_IN: &[Param] = &[by_address("value", Double)];
const COPY: &[Param] = &[by_address("a", Int), by_address("b", Int)];
const SUM: &[Param] = &[by_address("input", DoubleArray), by_address("length", Int)];
const SUM_FIXED: &[Param] = &[by_address("input", DoubleArray)];
const SUM_2D: &[Param] = &[
    by_address("input", DoubleArray),
    by_address("length1", Int),
    by_address("length2", Int),
];
const ROTATE: &[Param] = &[
    by_address("vectors", DoubleArray),
    by_address("count", Int),
    by_address("angle", Double),
];
const TEXT_FIXED_IN: &[Param] = &[by_address("text", CharArray), by_address("status", Int)];
const TEXT_VAR_IN: &[Param] = &[
    by_address("text", CharArray),
    by_value("length", Int),
    by_address("status", Int),
];
const TEXT_FIXED_OUT: &[Param] = &[by_address("text", CharArray)];
const TEXT_VAR_OUT: &[Param] = &[by_address("text", CharArray), by_address("length", Int)];
const RECORD_EXTRA: &[Param] = &[by_address("data", Record), by_address("extra_value", Double)];
const RECORD_CHANGE: &[Param] = &[by_address("data", Record), by_address("change", Double)];
const PROGRESS: &[Param] = &[
    by_address("total", Int),
    by_address("step", Int),
    by_value("callback", Callback),
];

const fn entry(
    symbol: &'static str,
    binding: Binding,
    params: &'static [Param],
    returns: Option<NativeType>,
) -> EntryPoint {
    EntryPoint {
        symbol,
        binding,
        params,
        returns,
    }
}

/// Every native entry point declared in `ffi.rs`, in declaration order.
pub const ENTRY_POINTS: &[EntryPoint] = &[
    entry("__interop_MOD_return_integer", Binding::Module, INT_IN, Some(Int)),
    entry("return_integer_c", Binding::IsoC, INT_IN, Some(Int)),
    entry("__interop_MOD_copy_integer", Binding::Module, COPY, None),
    entry("copy_integer_c", Binding::IsoC, COPY, None),
    entry("__interop_MOD_return_double", Binding::Module, DOUBLE_IN, Some(Double)),
    entry("return_double_c", Binding::IsoC, DOUBLE_IN, Some(Double)),
    entry("__interop_MOD_sum_array", Binding::Module, SUM, Some(Double)),
    entry("sum_array_c", Binding::IsoC, SUM, Some(Double)),
    entry("__interop_MOD_sum_array_fixed", Binding::Module, SUM_FIXED, Some(Double)),
    entry("sum_array_2d_c", Binding::IsoC, SUM_2D, Some(Double)),
    entry("__interop_MOD_rotate_vectors", Binding::Module, ROTATE, None),
    entry("rotate_vectors_c", Binding::IsoC, ROTATE, None),
    entry("__interop_MOD_string_input_fixlen", Binding::Module, TEXT_FIXED_IN, None),
    entry("__interop_MOD_string_input_varlen", Binding::Module, TEXT_VAR_IN, None),
    entry("__interop_MOD_string_output_fixlen", Binding::Module, TEXT_FIXED_OUT, None),
    entry("__interop_MOD_string_output_varlen", Binding::Module, TEXT_VAR_OUT, None),
    entry("__interop_MOD_pass_structure", Binding::Module, RECORD_EXTRA, Some(Double)),
    entry("pass_structure_c", Binding::IsoC, RECORD_EXTRA, Some(Double)),
    entry("__interop_MOD_modify_structure", Binding::Module, RECORD_CHANGE, None),
    entry("__interop_MOD_return_structure", Binding::Module, &[], Some(Record)),
    entry("__interop_MOD_callback_example", Binding::Module, PROGRESS, None),
    entry("callback_example_c", Binding::IsoC, PROGRESS, None),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_symbol_mangling() {
        assert_eq!(
            module_symbol(NATIVE_MODULE, "return_integer"),
            "__interop_MOD_return_integer"
        );
        assert_eq!(iso_c_symbol("return_integer"), "return_integer_c");
    }

    #[test]
    fn test_procedure_strips_decoration() {
        let module = find("__interop_MOD_copy_integer").expect("declared");
        let iso_c = find("copy_integer_c").expect("declared");
        assert_eq!(module.procedure(), "copy_integer");
        assert_eq!(iso_c.procedure(), "copy_integer");
    }

    #[test]
    fn test_find_unknown_symbol() {
        assert!(find("return_integer").is_none());
        assert!(find("__interop_MOD_return_integer_c").is_none());
    }

    #[test]
    fn test_entry_point_display() {
        let entry = find("__interop_MOD_string_input_varlen").expect("declared");
        assert_eq!(
            entry.to_string(),
            "__interop_MOD_string_input_varlen(text: *char[], length: int, status: *int)"
        );
        let entry = find("return_double_c").expect("declared");
        assert_eq!(entry.to_string(), "return_double_c(value: *double) -> double");
    }
}
