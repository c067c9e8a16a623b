//! Fortran module emitters.
//!
//! The generated module has three parts:
//!
//! 1. an `interface` block with one `bind(c)` declaration per entity,
//! 2. one generic interface per generic name,
//! 3. after `contains`, one adapter per wrapped entity that fills descriptors
//!    from assumed-shape Fortran arrays and calls the `_impl` binding.

use forbind_core::{ForeignType, MAX_RANK, ParamSig, Signature};

use super::{CodeWriter, wrap_line};
use crate::options::EmitOptions;
use crate::registry::{Entity, Registry};

const DESCRIPTOR_TYPE: &str = "type(gen_fortran_array_descriptor)";

fn specifier(signature: &Signature) -> &'static str {
    if signature.is_subroutine() {
        "subroutine"
    } else {
        "function"
    }
}

fn value_type(foreign: ForeignType) -> String {
    match foreign {
        ForeignType::Scalar(scalar) => scalar.fortran_type().to_string(),
        _ => "type(c_ptr)".to_string(),
    }
}

/// `subroutine` or `<type> function`.
fn procedure_kind(signature: &Signature) -> String {
    if signature.is_subroutine() {
        "subroutine".to_string()
    } else {
        format!("{} function", value_type(signature.result))
    }
}

/// Declaration of a parameter in a `bind(c)` interface.
fn binding_param(param: &ParamSig) -> String {
    match param.foreign {
        ForeignType::Descriptor => DESCRIPTOR_TYPE.to_string(),
        ForeignType::Pointer(scalar) => format!("{}, dimension(*)", scalar.fortran_type()),
        foreign => format!("{}, value", value_type(foreign)),
    }
}

/// Declaration of a parameter in a wrapped adapter.
fn adapter_param(param: &ParamSig) -> String {
    match param.array {
        Some(meta) if param.is_wrappable() => {
            format!("{}, {}", meta.kind.fortran_type(), meta.fortran_dimension())
        }
        _ => binding_param(param),
    }
}

fn arg_list(count: usize) -> String {
    (0..count).map(|i| format!("arg{i}")).collect::<Vec<_>>().join(", ")
}

fn write_interface(w: &mut CodeWriter, entity: &Entity, options: &EmitOptions) {
    let signature = &entity.signature;
    let binding = entity.binding_name();
    let bind = if entity.is_wrapped() {
        format!("bind(c, name=\"{}\")", entity.name)
    } else {
        "bind(c)".to_string()
    };
    let head = format!(
        "{} {}({}) {}",
        procedure_kind(signature),
        binding,
        arg_list(signature.params.len()),
        bind
    );
    w.raw(&wrap_line(&head, "    ", options.line_width));
    w.line("      use iso_c_binding");
    if signature.has_descriptor() {
        w.line(format!("      use {}", options.descriptor_module));
    }
    for (i, param) in signature.params.iter().enumerate() {
        w.line(format!("      {} :: arg{i}", binding_param(param)));
    }
    w.line(format!("    end {}", specifier(signature)));
}

fn write_descriptor_fill(w: &mut CodeWriter, index: usize, param: &ParamSig) {
    let Some(meta) = param.array else {
        return;
    };
    let arg = format!("arg{index}");
    let desc = format!("descriptor{index}");
    let lbounds = (1..=meta.rank)
        .map(|dim| format!("lbound({arg}, {dim})"))
        .collect::<Vec<_>>()
        .join(",");

    if meta.is_acc_present {
        w.line(format!("      !$acc data present({arg})"));
        w.line(format!("      !$acc host_data use_device({arg})"));
    }
    w.line(format!("      {desc}%rank = {}", meta.rank));
    w.line(format!("      {desc}%type = {}", meta.kind.tag()));
    w.line(format!("      {desc}%dims = reshape(shape({arg}), &"));
    w.line(format!("        shape({desc}%dims), (/0/))"));
    w.line(format!("      {desc}%data = c_loc({arg}({lbounds}))"));
    if meta.is_acc_present {
        w.line("      !$acc end host_data");
        w.line("      !$acc end data");
    }
    w.blank();
}

fn write_adapter(w: &mut CodeWriter, entity: &Entity, options: &EmitOptions) {
    let signature = &entity.signature;
    let head = format!(
        "{} {}({})",
        procedure_kind(signature),
        entity.name,
        arg_list(signature.params.len())
    );
    w.raw(&wrap_line(&head, "    ", options.line_width));
    w.line("      use iso_c_binding");
    if signature.has_descriptor() {
        w.line(format!("      use {}", options.descriptor_module));
    }
    for (i, param) in signature.params.iter().enumerate() {
        w.line(format!("      {}, target :: arg{i}", adapter_param(param)));
    }
    for (i, param) in signature.params.iter().enumerate() {
        if param.is_wrappable() {
            w.line(format!("      {DESCRIPTOR_TYPE} :: descriptor{i}"));
        }
    }
    w.blank();

    for (i, param) in signature.params.iter().enumerate() {
        if param.is_wrappable() {
            write_descriptor_fill(w, i, param);
        }
    }

    let args = signature
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            if param.is_wrappable() {
                format!("descriptor{i}")
            } else {
                format!("arg{i}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let call = if signature.is_subroutine() {
        format!("call {}({args})", entity.binding_name())
    } else {
        format!("{} = {}({args})", entity.name, entity.binding_name())
    };
    w.raw(&wrap_line(&call, "      ", options.line_width));
    w.line(format!("    end {}", specifier(signature)));
}

/// Emit the Fortran module `module_name` for every registered entity.
pub fn fortran_module(registry: &Registry, module_name: &str, options: &EmitOptions) -> String {
    let entities = registry.sorted();
    let mut w = CodeWriter::new();
    w.line(format!("! {}", options.banner));
    w.line(format!("module {module_name}"));
    w.line("implicit none");
    w.line("  interface");
    w.blank();
    for entity in &entities {
        log::trace!("fortran interface: {}", entity.name);
        write_interface(&mut w, entity, options);
    }
    w.blank();
    w.line("  end interface");

    for (generic, members) in registry.generics() {
        log::trace!("fortran generic: {generic}");
        w.line(format!("  interface {generic}"));
        w.raw(&wrap_line(
            &format!("procedure {}", members.join(", ")),
            "    ",
            options.line_width,
        ));
        w.line("  end interface");
    }

    w.line("contains");
    for entity in entities.iter().filter(|entity| entity.is_wrapped()) {
        log::trace!("fortran adapter: {}", entity.name);
        write_adapter(&mut w, entity, options);
    }
    w.line("end");
    w.finish()
}

/// Emit the module defining the descriptor derived type.
pub fn descriptor_module(options: &EmitOptions) -> String {
    let mut w = CodeWriter::new();
    w.line(format!("! {}", options.banner));
    w.line(format!("module {}", options.descriptor_module));
    w.line("use iso_c_binding");
    w.line("implicit none");
    w.line("  type, bind(c) :: gen_fortran_array_descriptor");
    w.line("    integer(c_int) :: type");
    w.line("    integer(c_int) :: rank");
    w.line(format!("    integer(c_int) :: dims({MAX_RANK})"));
    w.line("    logical(c_bool) :: is_acc_present");
    w.line("    type(c_ptr) :: data");
    w.line("  end type");
    w.line("end");
    w.finish()
}
