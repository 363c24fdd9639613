//! Procedural macros for registering user records as fixed-size scalars.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Fields, Index, Member,
};

/// Automatically derive the `Plain` and `Classify` traits for a struct whose
/// fields are all plain.
///
/// The generated implementation writes every field in declaration order, each
/// through its own `Plain` implementation, and never writes padding. `SIZE` is
/// the sum of the fields' sizes.
///
/// Enums and unions are rejected: their bytes are not a valid value for every
/// bit pattern of the same size.
///
/// # Example
///
/// ```ignore
/// use typecodec::Plain;
///
/// #[derive(Plain)]
/// #[repr(C)]
/// struct Rgb(u8, u8, u8);
///
/// #[derive(Plain)]
/// struct Pair<T> {
///     first: T,
///     second: T,
/// }
///
/// assert_eq!(Rgb::SIZE, 3);
/// assert_eq!(Pair::<u32>::SIZE, 8);
/// ```
#[proc_macro_derive(Plain)]
pub fn derive_plain(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_plain(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_plain(
    input: &DeriveInput,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "`Plain` cannot be derived for enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "`Plain` cannot be derived for unions",
            ))
        }
    };

    let members = members(fields);
    let types = fields.iter().map(|field| &field.ty).collect::<Vec<_>>();

    // every field type must itself be plain
    let mut generics = input.generics.clone();
    let where_clause = generics.make_where_clause();
    for ty in &types {
        where_clause.predicates.push(parse_quote! { #ty: ::typecodec::Plain });
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typecodec::Plain for #name #ty_generics
        #where_clause
        {
            const SIZE: usize = 0 #(+ <#types as ::typecodec::Plain>::SIZE)*;

            fn write_plain<__W: ::std::io::Write + ?Sized>(
                &self,
                __sink: &mut __W,
            ) -> ::std::io::Result<()> {
                #(
                    ::typecodec::Plain::write_plain(&self.#members, __sink)?;
                )*
                ::std::result::Result::Ok(())
            }

            fn read_plain<__R: ::std::io::Read + ?Sized>(
                __source: &mut __R,
            ) -> ::typecodec::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(
                        #members: <#types as ::typecodec::Plain>::read_plain(
                            __source,
                        )?,
                    )*
                })
            }
        }

        impl #impl_generics ::typecodec::Classify for #name #ty_generics
        #where_clause
        {
            type Shape = ::typecodec::shape::Fixed;
        }
    })
}

/// Names every field the way a struct expression refers to it: by identifier
/// for named fields and by position for tuple fields.
fn members(fields: &Fields) -> Vec<Member> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            field.ident.clone().map_or_else(
                || {
                    Member::Unnamed(Index {
                        index: u32::try_from(index).unwrap_or(u32::MAX),
                        span: proc_macro2::Span::call_site(),
                    })
                },
                Member::Named,
            )
        })
        .collect()
}
