//! ABI Compatibility Tests
//!
//! These tests pin the layout of everything that crosses the native boundary
//! and the exact symbol table. Any change to either should make them fail.

#[cfg(test)]
mod symbol_table_tests {
    use crate::native::symbols::{
        Binding, ENTRY_POINTS, NATIVE_MODULE, Passing, SYMBOL_TABLE_VERSION, iso_c_symbol,
        module_symbol,
    };
    use std::collections::HashSet;

    /// Test that the symbol table revision is the expected value.
    #[test]
    fn test_symbol_table_version() {
        assert_eq!(SYMBOL_TABLE_VERSION, 1, "symbol table version must be 1");
    }

    #[test]
    fn test_entry_point_count() {
        assert_eq!(ENTRY_POINTS.len(), 22, "22 native entry points are declared");
    }

    /// Symbol names must be unique: two declarations of one name would alias.
    #[test]
    fn test_symbols_are_unique() {
        let mut seen = HashSet::new();
        for entry in ENTRY_POINTS {
            assert!(seen.insert(entry.symbol), "duplicate symbol {}", entry.symbol);
        }
    }

    /// Test that each binding's names follow its export convention.
    #[test]
    fn test_symbol_decoration_matches_binding() {
        for entry in ENTRY_POINTS {
            let expected = match entry.binding {
                Binding::Module => module_symbol(NATIVE_MODULE, entry.procedure()),
                Binding::IsoC => iso_c_symbol(entry.procedure()),
            };
            assert_eq!(entry.symbol, expected, "{} is mis-decorated", entry.symbol);
        }
    }

    /// The only by-value arguments are the varlen string length and callbacks.
    #[test]
    fn test_by_value_parameters() {
        let by_value: Vec<(&str, &str)> = ENTRY_POINTS
            .iter()
            .flat_map(|entry| {
                entry
                    .params
                    .iter()
                    .filter(|param| param.passing == Passing::ByValue)
                    .map(move |param| (entry.symbol, param.name))
            })
            .collect();

        assert_eq!(
            by_value,
            vec![
                ("__interop_MOD_string_input_varlen", "length"),
                ("__interop_MOD_callback_example", "callback"),
                ("callback_example_c", "callback"),
            ]
        );
    }

    /// Scalar operations exist under both bindings with identical signatures.
    #[test]
    fn test_scalar_twins_share_signature() {
        for name in ["return_integer", "copy_integer", "return_double"] {
            let module = crate::native::symbols::find(&module_symbol(NATIVE_MODULE, name))
                .expect("module procedure declared");
            let iso_c =
                crate::native::symbols::find(&iso_c_symbol(name)).expect("iso c twin declared");
            assert_eq!(module.params, iso_c.params, "{name} parameters differ");
            assert_eq!(module.returns, iso_c.returns, "{name} return differs");
        }
    }
}

#[cfg(test)]
mod link_tests {
    use crate::native::ffi;
    use crate::native::symbols::ENTRY_POINTS;

    /// Take the address of every declared entry point.
    ///
    /// Referencing each symbol forces the linker to resolve it, so a symbol
    /// missing from the native library fails the test build.
    #[test]
    fn test_every_declared_symbol_links() {
        let addresses: [(&str, usize); 22] = [
            ("__interop_MOD_return_integer", ffi::__interop_MOD_return_integer as usize),
            ("return_integer_c", ffi::return_integer_c as usize),
            ("__interop_MOD_copy_integer", ffi::__interop_MOD_copy_integer as usize),
            ("copy_integer_c", ffi::copy_integer_c as usize),
            ("__interop_MOD_return_double", ffi::__interop_MOD_return_double as usize),
            ("return_double_c", ffi::return_double_c as usize),
            ("__interop_MOD_sum_array", ffi::__interop_MOD_sum_array as usize),
            ("sum_array_c", ffi::sum_array_c as usize),
            ("__interop_MOD_sum_array_fixed", ffi::__interop_MOD_sum_array_fixed as usize),
            ("sum_array_2d_c", ffi::sum_array_2d_c as usize),
            ("__interop_MOD_rotate_vectors", ffi::__interop_MOD_rotate_vectors as usize),
            ("rotate_vectors_c", ffi::rotate_vectors_c as usize),
            (
                "__interop_MOD_string_input_fixlen",
                ffi::__interop_MOD_string_input_fixlen as usize,
            ),
            (
                "__interop_MOD_string_input_varlen",
                ffi::__interop_MOD_string_input_varlen as usize,
            ),
            (
                "__interop_MOD_string_output_fixlen",
                ffi::__interop_MOD_string_output_fixlen as usize,
            ),
            (
                "__interop_MOD_string_output_varlen",
                ffi::__interop_MOD_string_output_varlen as usize,
            ),
            ("__interop_MOD_pass_structure", ffi::__interop_MOD_pass_structure as usize),
            ("pass_structure_c", ffi::pass_structure_c as usize),
            ("__interop_MOD_modify_structure", ffi::__interop_MOD_modify_structure as usize),
            ("__interop_MOD_return_structure", ffi::__interop_MOD_return_structure as usize),
            ("__interop_MOD_callback_example", ffi::__interop_MOD_callback_example as usize),
            ("callback_example_c", ffi::callback_example_c as usize),
        ];

        for ((symbol, address), entry) in addresses.iter().zip(ENTRY_POINTS) {
            assert_eq!(*symbol, entry.symbol, "declaration order diverges from table");
            assert_ne!(*address, 0, "{symbol} resolved to null");
        }
    }
}

#[cfg(test)]
mod layout_tests {
    use crate::native::abi::{
        FIXED_ARRAY_LEN, FIXED_INPUT_LEN, FIXED_OUTPUT_LEN, InteropRecord, RECORD_NAME_LEN,
        RECORD_VALUES_LEN,
    };
    use std::mem::{align_of, offset_of, size_of};

    /// Verify primitive widths the native side relies on.
    #[test]
    fn test_primitive_sizes() {
        assert_eq!(size_of::<libc::c_int>(), 4, "c_int must be 4 bytes");
        assert_eq!(size_of::<libc::c_double>(), 8, "c_double must be 8 bytes");
        assert_eq!(size_of::<libc::c_char>(), 1, "c_char must be 1 byte");
    }

    /// Verify the record matches the native derived type's sequential layout.
    #[test]
    fn test_record_layout() {
        assert_eq!(size_of::<InteropRecord>(), 104, "record must be 104 bytes");
        assert_eq!(align_of::<InteropRecord>(), 8, "record must be 8-byte aligned");
        assert_eq!(offset_of!(InteropRecord, id), 0);
        assert_eq!(offset_of!(InteropRecord, values), 8, "4 bytes padding after id");
        assert_eq!(offset_of!(InteropRecord, name), 88);
    }

    #[test]
    fn test_fixed_lengths() {
        assert_eq!(FIXED_ARRAY_LEN, 10);
        assert_eq!(RECORD_VALUES_LEN, 10);
        assert_eq!(RECORD_NAME_LEN, 16);
        assert_eq!(FIXED_INPUT_LEN, 10);
        assert_eq!(FIXED_OUTPUT_LEN, 20);
    }

    /// A callback is a single code pointer.
    #[test]
    fn test_callback_is_pointer_sized() {
        use crate::native::abi::ProgressCallback;
        assert_eq!(size_of::<ProgressCallback>(), size_of::<usize>());
        assert_eq!(size_of::<Option<ProgressCallback>>(), size_of::<usize>());
    }
}
