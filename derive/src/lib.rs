// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! A crate providing custom derive functionality for the `classwiz`
//! crate.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;

use quote::quote;

use syn::parse2;
use syn::Data;
use syn::DeriveInput;
use syn::Fields;


/// Custom derive functionality for the `classwiz::Describe` trait.
///
/// The derive maps a struct with named fields onto the descriptor
/// model: the class reference is the struct's name and every field
/// becomes a keyword argument through `classwiz::FormField`. Field
/// types hence need to implement `classwiz::FormField` as well as
/// `Clone`.
///
/// ```rust
/// use classwiz::ClassRegistry;
/// use classwiz::Describe as _;
/// use classwiz_derive::Describe;
///
/// #[derive(Clone, Debug, Describe)]
/// struct Point {
///   x: f64,
///   y: f64,
/// }
///
/// let mut registry = ClassRegistry::new();
/// let _handle = registry.register::<Point>();
///
/// let point = Point { x: 1.0, y: 2.0 };
/// let info = point.describe(&registry).unwrap();
/// assert_eq!(info.class_ref(), "Point");
///
/// let rebuilt = Point::build(&info).unwrap();
/// assert_eq!(rebuilt.x, 1.0);
/// ```
#[proc_macro_derive(Describe)]
pub fn describe(input: TokenStream) -> TokenStream {
  match expand_describe(input.into()) {
    Ok(tokens) => tokens.into(),
    Err(error) => panic!("unable to derive Describe: {error}"),
  }
}

fn expand_describe(input: Tokens) -> Result<Tokens, String> {
  let input = parse2::<DeriveInput>(input).map_err(|error| error.to_string())?;
  let fields = match &input.data {
    Data::Struct(data) => match &data.fields {
      Fields::Named(fields) => &fields.named,
      _ => return Err("only structs with named fields are supported".to_string()),
    },
    _ => return Err("only structs are supported".to_string()),
  };

  let mut idents = Vec::new();
  let mut names = Vec::new();
  let mut types = Vec::new();

  for field in fields {
    let ident = field
      .ident
      .as_ref()
      .ok_or_else(|| "encountered an unnamed field".to_string())?;

    idents.push(ident.clone());
    names.push(ident.to_string());
    types.push(field.ty.clone());
  }

  let name = &input.ident;
  let name_str = name.to_string();
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  let tokens = quote! {
    impl #impl_generics ::classwiz::Describe for #name #ty_generics #where_clause {
      fn class_ref() -> &'static str {
        #name_str
      }

      fn class_spec() -> ::classwiz::ClassSpec {
        ::classwiz::ClassSpec::new(#name_str)
          #(.field(::classwiz::FieldSpec::new(
            #names,
            <#types as ::classwiz::FormField>::KIND,
          )))*
      }

      fn describe(
        &self,
        registry: &::classwiz::ClassRegistry,
      ) -> ::std::result::Result<::classwiz::ObjectInfo, ::classwiz::Error> {
        let class = registry.resolve(#name_str)?;
        ::std::result::Result::Ok(
          ::classwiz::ObjectInfo::new(class)
            #(.with(
              #names,
              ::classwiz::FormField::into_value(
                ::std::clone::Clone::clone(&self.#idents),
              ),
            ))*
        )
      }

      fn build(
        info: &::classwiz::ObjectInfo,
      ) -> ::std::result::Result<Self, ::classwiz::Error> {
        ::std::result::Result::Ok(Self {
          #(
            #idents: ::classwiz::FormField::from_value(
              ::std::clone::Clone::clone(info.get(#names).ok_or_else(|| {
                ::classwiz::Error::MissingKwarg(
                  ::std::string::ToString::to_string(#names),
                )
              })?),
            )?,
          )*
        })
      }
    }
  };
  Ok(tokens)
}
