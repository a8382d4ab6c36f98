//! `#[derive(Record)]`: implements the C2 operations
//! (`Shape`/`Encode`/`Decode`/`Print`) for a struct or fieldless enum and
//! registers it with `structwire`'s compile-time type registry.
//!
//! Two shapes are supported:
//!
//! - A struct (named or tuple fields) becomes an **aggregate**: its fields
//!   are encoded in declaration order with no padding, and its structural
//!   hash folds only its fields' own structural hashes (no extra family
//!   tag), matching the reference implementation's aggregate hashing
//!   (`serial_aggregate.h`'s `HashFunctor`).
//! - A fieldless enum becomes an **enum**: it is encoded as its
//!   discriminant, read as the integer type named by its `#[repr(..)]`
//!   attribute, or `u32` if none is given.
//!
//! Grounded on the teacher's `abio_derive`'s overall shape (parse the
//! `DeriveInput`, split generics via `split_for_impl`, emit one `impl`
//! block per trait via `quote!`) — its own trait-dispatch abstraction
//! (`Marker`, `gen_marker_trait_impl`) built on the unmaintained `virtue`
//! crate is not reused; this derive talks to `syn`/`quote` directly.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, Index};

#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Struct(data) => derive_aggregate(&input, &data.fields),
        Data::Enum(data) => derive_enum(&input, data),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "`#[derive(Record)]` does not support unions")
                .to_compile_error()
        }
    };
    TokenStream::from(expanded)
}

/// One field, abstracted over named-struct vs tuple-struct syntax: `access`
/// is the token sequence used to reach the field on `self` (`self.name` or
/// `self.0`), and `binder` is the pattern used to bind it when
/// constructing a fresh value during decode.
struct FieldSpec {
    access: TokenStream2,
    binder: Ident,
    ty: syn::Type,
}

fn collect_fields(fields: &Fields) -> Vec<FieldSpec> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| {
                let ident = f.ident.clone().expect("named field always has an ident");
                FieldSpec { access: quote!(#ident), binder: ident, ty: f.ty.clone() }
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let index = Index::from(i);
                let binder = format_ident!("field_{i}");
                FieldSpec { access: quote!(#index), binder, ty: f.ty.clone() }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

fn derive_aggregate(input: &DeriveInput, fields: &Fields) -> TokenStream2 {
    let name = &input.ident;
    let alias = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let decode_generic_params: Vec<_> = input.generics.params.iter().collect();
    let specs = collect_fields(fields);

    let hash_fields = specs.iter().map(|f| {
        let ty = &f.ty;
        quote! { <#ty as ::structwire::Shape>::structural_hash(h); }
    });
    let size_fields = specs.iter().map(|f| {
        let ty = &f.ty;
        quote! { total = total.checked_add(<#ty as ::structwire::Shape>::static_size()?)?; }
    });
    let byte_size_fields = specs.iter().map(|f| {
        let access = &f.access;
        quote! { ::structwire::Encode::byte_size(&self.#access) }
    });
    let encode_fields = specs.iter().map(|f| {
        let access = &f.access;
        quote! { ::structwire::Encode::encode(&self.#access, cursor)?; }
    });
    let validate_fields = specs.iter().map(|f| {
        let ty = &f.ty;
        quote! { <#ty as ::structwire::Decode>::validate(cursor)?; }
    });

    let is_named = matches!(fields, Fields::Named(_));
    let construct = if is_named {
        let assigns = specs.iter().map(|f| {
            let binder = &f.binder;
            let ty = &f.ty;
            quote! { #binder: <#ty as ::structwire::Decode>::decode(cursor)? }
        });
        quote! { #name { #(#assigns),* } }
    } else if specs.is_empty() {
        quote! { #name }
    } else {
        let assigns = specs.iter().map(|f| {
            let ty = &f.ty;
            quote! { <#ty as ::structwire::Decode>::decode(cursor)? }
        });
        quote! { #name ( #(#assigns),* ) }
    };

    let print_fields = specs.iter().enumerate().map(|(i, f)| {
        let access = &f.access;
        let label = match &f.binder {
            binder if is_named => binder.to_string(),
            _ => String::new(),
        };
        let prefix = if i == 0 { quote!() } else { quote! { sink.write_str(", ")?; } };
        if is_named {
            quote! {
                #prefix
                sink.write_str(#label)?;
                sink.write_str(": ")?;
                ::structwire::Print::print(&self.#access, sink, indent + 1)?;
            }
        } else {
            quote! {
                #prefix
                ::structwire::Print::print(&self.#access, sink, indent + 1)?;
            }
        }
    });

    quote! {
        impl #impl_generics ::structwire::Shape for #name #ty_generics #where_clause {
            const FAMILY: ::structwire::Family = ::structwire::Family::Aggregate;
            const ALIAS: &'static str = #alias;

            fn structural_hash(hasher: &mut ::structwire::__private::StructuralHasher) {
                hasher.nested(|h| {
                    #(#hash_fields)*
                });
            }

            fn static_size() -> Option<usize> {
                let mut total = 0usize;
                #(#size_fields)*
                Some(total)
            }
        }

        impl #impl_generics ::structwire::Encode for #name #ty_generics #where_clause {
            fn byte_size(&self) -> usize {
                0usize #(+ #byte_size_fields)*
            }

            fn encode<O: ::structwire::ByteOrder>(
                &self,
                cursor: &mut ::structwire::WriteCursor<'_, O>,
            ) -> ::structwire::Result<()> {
                #(#encode_fields)*
                Ok(())
            }
        }

        impl<'de, #(#decode_generic_params),*> ::structwire::Decode<'de> for #name #ty_generics #where_clause {
            fn validate<O: ::structwire::ByteOrder>(
                cursor: &mut ::structwire::ReadCursor<'de, O>,
            ) -> ::structwire::Result<()> {
                #(#validate_fields)*
                Ok(())
            }

            fn decode<O: ::structwire::ByteOrder>(
                cursor: &mut ::structwire::ReadCursor<'de, O>,
            ) -> ::structwire::Result<Self> {
                Ok(#construct)
            }
        }

        impl #impl_generics ::structwire::Print for #name #ty_generics #where_clause {
            fn print<S: ::structwire::Sink>(&self, sink: &mut S, indent: usize) -> ::structwire::Result<()> {
                sink.write_str(#alias)?;
                sink.write_str(" { ")?;
                #(#print_fields)*
                sink.write_str(" }")
            }
        }

        ::structwire::__private::inventory::submit! {
            ::structwire::__private::TypeEntry::of::<#name #ty_generics>()
        }
    }
}

/// Integer type an enum's discriminants are read/written as, derived from
/// its `#[repr(..)]` attribute; `u32` if none is present.
fn discriminant_repr(input: &DeriveInput) -> Ident {
    for attr in &input.attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let mut found = None;
        let _ = attr.parse_nested_meta(|meta| {
            for candidate in ["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64"] {
                if meta.path.is_ident(candidate) {
                    found = Some(format_ident!("{candidate}"));
                }
            }
            Ok(())
        });
        if let Some(ident) = found {
            return ident;
        }
    }
    format_ident!("u32")
}

fn derive_enum(input: &DeriveInput, data: &syn::DataEnum) -> TokenStream2 {
    let name = &input.ident;
    let alias = name.to_string();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "`#[derive(Record)]` only supports fieldless enums",
            )
            .to_compile_error();
        }
    }

    let repr = discriminant_repr(input);
    let variant_idents: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();

    let to_repr_arms = variant_idents.iter().map(|variant| {
        quote! { #name::#variant => #name::#variant as #repr, }
    });
    let from_repr_arms = variant_idents.iter().map(|variant| {
        quote! { x if x == (#name::#variant as #repr) => ::core::result::Result::Ok(#name::#variant), }
    });

    quote! {
        impl ::structwire::Shape for #name {
            const FAMILY: ::structwire::Family = ::structwire::Family::Enum;
            const ALIAS: &'static str = #alias;

            fn structural_hash(hasher: &mut ::structwire::__private::StructuralHasher) {
                hasher
                    .fold(Self::FAMILY as u32)
                    .fold(::core::mem::size_of::<#repr>() as u32);
            }

            fn static_size() -> Option<usize> {
                Some(::core::mem::size_of::<#repr>())
            }
        }

        impl ::structwire::Encode for #name {
            fn byte_size(&self) -> usize {
                ::core::mem::size_of::<#repr>()
            }

            fn encode<O: ::structwire::ByteOrder>(
                &self,
                cursor: &mut ::structwire::WriteCursor<'_, O>,
            ) -> ::structwire::Result<()> {
                let repr: #repr = match self {
                    #(#to_repr_arms)*
                };
                ::structwire::Encode::encode(&repr, cursor)
            }
        }

        impl<'de> ::structwire::Decode<'de> for #name {
            fn validate<O: ::structwire::ByteOrder>(
                cursor: &mut ::structwire::ReadCursor<'de, O>,
            ) -> ::structwire::Result<()> {
                <#repr as ::structwire::Decode>::validate(cursor)
            }

            fn decode<O: ::structwire::ByteOrder>(
                cursor: &mut ::structwire::ReadCursor<'de, O>,
            ) -> ::structwire::Result<Self> {
                let repr = <#repr as ::structwire::Decode>::decode(cursor)?;
                match repr {
                    #(#from_repr_arms)*
                    _ => ::core::result::Result::Err(::structwire::Error::invalid_codec(
                        "unrecognized enum discriminant",
                    )),
                }
            }
        }

        impl ::structwire::Print for #name {
            fn print<S: ::structwire::Sink>(&self, sink: &mut S, _indent: usize) -> ::structwire::Result<()> {
                let label = match self {
                    #(#name::#variant_idents => stringify!(#variant_idents),)*
                };
                sink.write_str(label)
            }
        }

        ::structwire::__private::inventory::submit! {
            ::structwire::__private::TypeEntry::of::<#name>()
        }
    }
}
