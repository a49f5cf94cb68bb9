use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Meta, Result, Token,
    ext::IdentExt, parse_quote,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

pub(crate) fn expand_from_element(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromElement` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromElement` may only be derived on structs with named fields.",
        ))?
    };

    let hook = HookKind::parse(&input.attrs)?;

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let statements = fields.iter().map(|field| {
        let FieldMetadata {
            ident,
            name,
            selector,
            extract,
        } = field;

        quote! {
            {
                static FIELD: ::gleaner::sans::rule::FieldRule =
                    ::gleaner::sans::rule::FieldRule::new(#name, #selector, #extract);
                ::gleaner::avec::decode_field(&mut self.#ident, &FIELD, m)?;
            }
        }
    });

    let hook_method = hook.map(|hook| {
        let variant = match hook {
            HookKind::Html => quote!(Html),
            HookKind::Text => quote!(Text),
            HookKind::Binary => quote!(Binary),
        };

        quote! {
            fn hook(&mut self) -> ::gleaner::avec::Hook<'_> {
                ::gleaner::avec::Hook::#variant(self)
            }
        }
    });

    // Type parameters may stand in for any field, so each must be decodable.
    let mut generics = input.generics.clone();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let predicates = &mut generics.make_where_clause().predicates;
    for param in params {
        predicates.push(parse_quote! {
            #param: ::gleaner::avec::FromElement + ::core::default::Default
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::gleaner::avec::FromElement for #name #ty_generics #where_clause {
            const SHAPE: ::gleaner::avec::Shape = ::gleaner::avec::Shape::Record;

            #hook_method

            #[allow(unused_variables)]
            fn from_match(
                &mut self,
                m: &::gleaner::avec::Match<'_>,
            ) -> ::core::result::Result<(), ::gleaner::avec::Error> {
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    };

    Ok(expanded.into())
}

/// Hook capabilities, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HookKind {
    Html,
    Text,
    Binary,
}

impl HookKind {
    /// Resolve the hook declared by container attributes, if any.
    fn parse(attrs: &[Attribute]) -> Result<Option<Self>> {
        let mut hook: Option<Self> = None;

        for attr in attrs.iter().filter(|a| a.path().is_ident("scrape")) {
            let kinds = attr
                .meta
                .require_list()?
                .parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)?;

            for kind in kinds {
                let kind = if kind == "html" {
                    Self::Html
                } else if kind == "text" {
                    Self::Text
                } else if kind == "binary" {
                    Self::Binary
                } else {
                    Err(Error::new_spanned(
                        kind,
                        "Hook must be one of `html`, `text` or `binary`.",
                    ))?
                };

                hook = Some(hook.map_or(kind, |h| h.min(kind)));
            }
        }

        Ok(hook)
    }
}

#[derive(Debug)]
struct FieldMetadata {
    ident: Ident,
    name: String,
    selector: String,
    extract: String,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let ident = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("scrape")) else {
            return Ok(None);
        };

        let options = match &attr.meta {
            Meta::Path(_) => Punctuated::new(),
            Meta::List(list) => {
                list.parse_args_with(Punctuated::<FieldOption, Token![,]>::parse_terminated)?
            }
            Meta::NameValue(meta) => Err(Error::new_spanned(
                meta,
                "Expected `#[scrape(\"selector\", ...)]`.",
            ))?,
        };

        let mut selector: Option<String> = None;
        let mut extract: Option<String> = None;

        for option in options {
            let (slot, value, span) = match option {
                FieldOption::Selector(lit) => (&mut selector, lit.value(), lit.span()),
                FieldOption::Extract(lit) => (&mut extract, lit.value(), lit.span()),
                FieldOption::Attr(lit) => (&mut extract, format!("attr:{}", lit.value()), lit.span()),
            };

            if slot.replace(value).is_some() {
                Err(Error::new(
                    span,
                    "A selector and an extraction may each be given only once.",
                ))?
            }
        }

        Ok(Some(Self {
            name: ident.unraw().to_string(),
            ident,
            selector: selector.unwrap_or_default(),
            extract: extract.unwrap_or_default(),
        }))
    }
}

#[derive(Debug)]
enum FieldOption {
    Selector(LitStr),
    Extract(LitStr),
    Attr(LitStr),
}

impl Parse for FieldOption {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Selector(input.parse()?));
        }

        let key = input.parse::<Ident>()?;
        input.parse::<Token![=]>()?;
        let value = input.parse::<LitStr>()?;

        if key == "extract" {
            Ok(Self::Extract(value))
        } else if key == "attr" {
            Ok(Self::Attr(value))
        } else {
            Err(Error::new_spanned(
                key,
                "Expected a selector string, `extract = \"...\"` or `attr = \"...\"`.",
            ))
        }
    }
}
