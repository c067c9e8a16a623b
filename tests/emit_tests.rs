//! Integration tests for `#[export]` and artifact emission.

use forbind::{
    ArrayDescriptor, EmitOptions, Entity, Generator, Registry, emit, export, signature_of,
};
use pretty_assertions::assert_eq;

#[export(wrapped, generic = "scale")]
fn scale_f64(values: &mut [[f64; 4]; 3], factor: f64) {
    values.iter_mut().flatten().for_each(|value| *value *= factor);
}

#[export(wrapped, generic = "scale")]
fn scale_f32(values: &mut [[f32; 4]; 3], factor: f32) {
    values.iter_mut().flatten().for_each(|value| *value *= factor);
}

/// Euclidean norm of a 3-vector.
#[export(name = "norm2")]
fn norm<'a>(values: &'a [f64; 3]) -> f64 {
    values.iter().map(|value| value * value).sum::<f64>().sqrt()
}

#[export]
fn accumulate(total: &mut i64, value: i64) -> bool {
    *total += value;
    *total > 0
}

unsafe extern "C" {
    #[link_name = "norm2"]
    fn norm2_symbol(values: *mut ArrayDescriptor) -> f64;
}

#[test]
fn test_exported_functions_stay_native() {
    let mut values = [[1.0; 4]; 3];
    scale_f64(&mut values, 2.5);
    assert!(values.iter().flatten().all(|&value| value == 2.5));
    assert_eq!(norm(&[3.0, 4.0, 0.0]), 5.0);
}

#[test]
fn test_symbol_uses_export_name() {
    let mut values = [0.0, 3.0, 4.0];
    let mut descriptor = ArrayDescriptor::describe(&mut values);
    assert_eq!(unsafe { norm2_symbol(&mut descriptor) }, 5.0);
}

#[test]
fn test_collect_registers_every_export() {
    let registry = Registry::collect().unwrap();
    let names: Vec<&str> = registry.sorted().iter().map(|entity| entity.name.as_str()).collect();
    assert_eq!(names, ["accumulate", "gen_release", "norm2", "scale_f32", "scale_f64"]);
    assert_eq!(registry.get("scale_f32").unwrap().generic.as_deref(), Some("scale"));
    assert!(registry.get("scale_f64").unwrap().is_wrapped());
    assert!(!registry.get("norm2").unwrap().is_wrapped());
}

#[test]
fn test_c_header_lists_sorted_declarations() {
    let generator = Generator::collect(EmitOptions::default().with_inline_prelude(false)).unwrap();
    let expected = "\
// This file is generated!
#pragma once

#include <stdbool.h>

#ifdef __cplusplus
extern \"C\" {
#endif

bool accumulate(long long*, long long);
void gen_release(gen_handle*);
double norm2(gen_fortran_array_descriptor*);
void scale_f32(gen_fortran_array_descriptor*, float);
void scale_f64(gen_fortran_array_descriptor*, double);

#ifdef __cplusplus
}
#endif
";
    assert_eq!(generator.c_header(), expected);
}

#[test]
fn test_fortran_module_groups_generics() {
    let generator = Generator::collect(EmitOptions::default()).unwrap();
    let module = generator.fortran_module("bindings");

    assert!(module.starts_with("! This file is generated!\nmodule bindings\n"));
    assert!(module.contains("  interface scale\n    procedure scale_f32, scale_f64\n  end interface\n"));
    assert!(module.contains("    logical(c_bool) function accumulate(arg0, arg1) bind(c)\n"));
    assert!(module.contains("    subroutine scale_f64(arg0, arg1)\n"));
    assert!(module.contains("      real(c_float), dimension(:,:), target :: arg0\n"));
    assert!(module.contains("      call scale_f64_impl(descriptor0, arg1)\n"));
    assert!(!module.contains("norm2_impl"));
    assert!(module.ends_with("end\n"));
}

#[test]
fn test_emission_is_idempotent() {
    let first = Generator::collect(EmitOptions::default()).unwrap();
    let second = Generator::collect(EmitOptions::default()).unwrap();
    assert_eq!(first.c_header(), second.c_header());
    assert_eq!(first.fortran_module("bindings"), second.fortran_module("bindings"));
    assert_eq!(first.c_header(), first.c_header());
}

#[test]
fn test_emission_ignores_registration_order() {
    let entities = || {
        vec![
            Entity::wrapped("zeta", signature_of::<(&mut [i32; 8],), ()>()).with_generic("fill"),
            Entity::plain("alpha", signature_of::<(i32, &mut f32), f64>()),
            Entity::wrapped("mid", signature_of::<(&[[u8; 2]; 2], i64), i32>()).with_generic("fill"),
        ]
    };

    let mut forward = Registry::new();
    for entity in entities() {
        forward.add(entity).unwrap();
    }
    let mut backward = Registry::new();
    for entity in entities().into_iter().rev() {
        backward.add(entity).unwrap();
    }

    let options = EmitOptions::default();
    assert_eq!(emit::c_header(&forward, &options), emit::c_header(&backward, &options));
    assert_eq!(
        emit::fortran_module(&forward, "ordered", &options),
        emit::fortran_module(&backward, "ordered", &options)
    );
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut registry = Registry::collect().unwrap();
    let err = registry
        .add(Entity::plain("norm2", signature_of::<(), ()>()))
        .unwrap_err();
    assert_eq!(err, forbind::RegistrationError::Duplicate("norm2".to_string()));
}

#[test]
fn test_export_cannot_reuse_a_generic_name() {
    let mut registry = Registry::collect().unwrap();
    let err = registry
        .add(Entity::plain("scale", signature_of::<(f64,), f64>()))
        .unwrap_err();
    assert_eq!(err, forbind::RegistrationError::GenericClash("scale".to_string()));
    assert!(!registry.contains("scale"));
}
