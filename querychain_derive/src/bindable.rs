use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Fields, Ident, parse_macro_input};

pub fn bindable_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;
    let (impl_gen, ty_gen, where_clause) = input.generics.split_for_impl();

    let variants = match &input.data {
        Data::Enum(e) => &e.variants,
        _ => {
            return Error::new_spanned(
                &input.ident,
                "`#[derive(Bindable)]` can only be applied to enums",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut all_impls = Vec::new();

    for variant in variants {
        let var_ident = &variant.ident;

        if variant.attrs.iter().any(is_bindable_ignore) {
            continue;
        }

        // `#[cfg(...)]` and friends follow the variant onto every impl
        let forwarded_attrs = variant
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect::<Vec<_>>();

        let inner_ty = match &variant.fields {
            Fields::Unit => continue,
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                match fields.unnamed.first() {
                    Some(field) => &field.ty,
                    None => continue,
                }
            }
            _ => {
                return Error::new_spanned(
                    var_ident,
                    "each bindable variant must be a unit or hold a single unnamed field",
                )
                .to_compile_error()
                .into();
            }
        };

        all_impls.push(quote! {
            #(#forwarded_attrs)*
            impl #impl_gen From<#inner_ty> for #enum_name #ty_gen #where_clause {
                fn from(value: #inner_ty) -> Self {
                    #enum_name::#var_ident(value)
                }
            }

            #(#forwarded_attrs)*
            impl IntoBind for #inner_ty {
                fn into_bind(self) -> #enum_name {
                    #enum_name::#var_ident(self)
                }
            }
        });
    }

    all_impls.push(quote! {
        impl IntoBind for #enum_name {
            fn into_bind(self) -> #enum_name {
                self
            }
        }
    });

    quote! {
        #(#all_impls)*
    }
    .into()
}

/// Returns true if the attribute is exactly `#[bindable(ignore)]`.
fn is_bindable_ignore(attr: &Attribute) -> bool {
    if !attr.path().is_ident("bindable") {
        return false;
    }
    matches!(attr.parse_args::<Ident>(), Ok(ident) if ident == "ignore")
}
