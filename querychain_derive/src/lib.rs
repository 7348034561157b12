use proc_macro::TokenStream;

mod binary;
mod bindable;

#[proc_macro_derive(BinaryOperator, attributes(binary))]
pub fn binary_operator_constructors(input: TokenStream) -> TokenStream {
    binary::binary_operator_constructors_impl(input)
}

#[proc_macro_derive(Bindable, attributes(bindable))]
pub fn bindable_derive(input: TokenStream) -> TokenStream {
    bindable::bindable_derive_impl(input)
}
