use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct BinaryDeriveInput {
    ident: syn::Ident,
    data: ast::Data<BinaryVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(binary))]
struct BinaryVariant {
    ident: syn::Ident,
    #[darling(default)]
    ignore: bool,
}

/// Generates, for every variant not marked `#[binary(ignore)]`, an associated
/// constructor on `crate::expr::Condition` and a free function of the same
/// snake case name next to the enum.
pub fn binary_operator_constructors_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match BinaryDeriveInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;

    let Some(variants) = enum_info.data.take_enum() else {
        return syn::Error::new_spanned(enum_name, "`BinaryOperator` only supports enums")
            .to_compile_error()
            .into();
    };

    let binary = variants.iter().filter(|var| !var.ignore);

    let methods = binary.clone().map(|var| {
        let var_name = &var.ident;
        let fn_name = format_ident!("{}", var_name.to_string().to_snake_case());
        let doc = format!("`column {var_name} value` condition.");

        quote! {
            #[doc = #doc]
            pub fn #fn_name<C, V>(column: C, value: V) -> Self
            where
                C: ::core::convert::Into<::smol_str::SmolStr>,
                V: crate::IntoOperand,
            {
                Self::simple(
                    column,
                    #enum_name::#var_name,
                    ::std::vec![crate::IntoOperand::into_operand(value)],
                )
            }
        }
    });

    let functions = binary.map(|var| {
        let fn_name = format_ident!("{}", var.ident.to_string().to_snake_case());

        quote! {
            pub fn #fn_name<C, V>(column: C, value: V) -> crate::expr::Condition
            where
                C: ::core::convert::Into<::smol_str::SmolStr>,
                V: crate::IntoOperand,
            {
                crate::expr::Condition::#fn_name(column, value)
            }
        }
    });

    quote! {
        impl crate::expr::Condition {
            #(#methods)*
        }

        #(#functions)*
    }
    .into()
}
