use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parenthesized, punctuated::Punctuated, Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields,
    Ident, Lit, LitStr, Token, Type, UnOp,
};

#[derive(Default)]
struct PortAttrs {
    name: Option<LitStr>,
    widget: Option<Ident>,
    range: Option<RangeAttr>,
}

enum RangeAttr {
    Continuous { min: Expr, max: Expr, init: Expr },
    Discrete { values: Vec<Expr>, init: Option<Expr> },
}

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "`Port` can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "`Port` can only be derived for structs with named fields",
            ))
        }
    };

    let attrs = parse_attrs(&input)?;
    let value_ty: Option<&Type> = fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == "value"))
        .map(|f| &f.ty);
    let values_field = fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == "values"));

    if let (None, Some(values)) = (value_ty, values_field) {
        return Err(syn::Error::new_spanned(
            values,
            "a `values` history requires a `value` member",
        ));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let port_name = attrs
        .name
        .as_ref()
        .map(LitStr::value)
        .unwrap_or_else(|| ident.to_string());

    let mut shape = match value_ty {
        Some(ty) => quote! {
            ::portvalue_core::PortShape::parameter(<#ty as ::portvalue_core::Project>::SHAPE)
                .with_members(<#ty as ::portvalue_core::Project>::MEMBERS)
        },
        None => quote!(::portvalue_core::PortShape::NONE),
    };
    if let Some(range) = &attrs.range {
        let kind = match range {
            RangeAttr::Continuous { .. } => quote!(Continuous),
            RangeAttr::Discrete { .. } => quote!(Discrete),
        };
        shape = quote!(#shape.with_range(::portvalue_core::RangeKind::#kind));
    }
    if let Some(widget) = &attrs.widget {
        shape = quote!(#shape.with_widget(::portvalue_core::WidgetKind::#widget));
    }
    if let Some(values) = values_field {
        let timed_ty = &values.ty;
        shape = quote!(#shape.with_timed(<#timed_ty as ::portvalue_core::TimedValues>::SHAPE));
    }

    let range_fn = attrs.range.as_ref().map(|range| {
        let body = range_tokens(range);
        quote! {
            fn range() -> ::core::option::Option<::portvalue_core::Range> {
                ::core::option::Option::Some(#body)
            }
        }
    });

    let mut output = quote! {
        impl #impl_generics ::portvalue_core::Port for #ident #ty_generics #where_clause {
            const NAME: &'static str = #port_name;
            const SHAPE: ::portvalue_core::PortShape = #shape;

            #range_fn
        }
    };

    if let Some(ty) = value_ty {
        output.extend(quote! {
            impl #impl_generics ::portvalue_core::Parameter for #ident #ty_generics #where_clause {
                type Value = #ty;

                fn value(&self) -> &Self::Value {
                    &self.value
                }

                fn value_mut(&mut self) -> &mut Self::Value {
                    &mut self.value
                }
            }
        });
    }

    if let Some(values) = values_field {
        let timed_ty = &values.ty;
        output.extend(quote! {
            impl #impl_generics ::portvalue_core::SampleAccurate for #ident #ty_generics #where_clause {
                type Timed = #timed_ty;

                fn timed(&self) -> &Self::Timed {
                    &self.values
                }

                fn timed_mut(&mut self) -> &mut Self::Timed {
                    &mut self.values
                }
            }
        });
    }

    Ok(output)
}

fn parse_attrs(input: &DeriveInput) -> syn::Result<PortAttrs> {
    let mut attrs = PortAttrs::default();
    let mut discrete_values: Option<Vec<Expr>> = None;
    let mut discrete_init: Option<Expr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("port")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attrs.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("widget") {
                attrs.widget = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("range") {
                let (mut min, mut max, mut init) = (None, None, None);
                meta.parse_nested_meta(|inner| {
                    let slot = if inner.path.is_ident("min") {
                        &mut min
                    } else if inner.path.is_ident("max") {
                        &mut max
                    } else if inner.path.is_ident("init") {
                        &mut init
                    } else {
                        return Err(inner.error("expected `min`, `max` or `init`"));
                    };
                    *slot = Some(inner.value()?.parse::<Expr>()?);
                    Ok(())
                })?;
                match (min, max, init) {
                    (Some(min), Some(max), Some(init)) => {
                        attrs.range = Some(RangeAttr::Continuous { min, max, init });
                    }
                    _ => return Err(meta.error("`range` needs `min`, `max` and `init`")),
                }
            } else if meta.path.is_ident("values") {
                let content;
                parenthesized!(content in meta.input);
                let values = Punctuated::<Expr, Token![,]>::parse_terminated(&content)?;
                discrete_values = Some(values.into_iter().collect());
            } else if meta.path.is_ident("init") {
                discrete_init = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unsupported port attribute"));
            }
            Ok(())
        })?;
    }

    match (discrete_values, discrete_init) {
        (Some(values), init) => {
            if attrs.range.is_some() {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "a port declares either `range(..)` or `values(..)`, not both",
                ));
            }
            attrs.range = Some(RangeAttr::Discrete { values, init });
        }
        (None, Some(init)) => {
            return Err(syn::Error::new_spanned(
                init,
                "`init` outside `range(..)` needs a `values(..)` list",
            ));
        }
        (None, None) => {}
    }

    if let Some(range) = &attrs.range {
        check_range(range)?;
    }
    Ok(attrs)
}

/// Numeric value of a literal or negated literal expression.
fn literal_number(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => lit.base10_parse::<f64>().ok(),
        Expr::Lit(ExprLit {
            lit: Lit::Float(lit),
            ..
        }) => lit.base10_parse::<f64>().ok(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => literal_number(expr).map(|v| -v),
        Expr::Group(group) => literal_number(&group.expr),
        Expr::Paren(paren) => literal_number(&paren.expr),
        _ => None,
    }
}

/// Rejects ranges that can be shown inconsistent from their literals.
fn check_range(range: &RangeAttr) -> syn::Result<()> {
    match range {
        RangeAttr::Continuous { min, max, init } => {
            if let (Some(lo), Some(hi)) = (literal_number(min), literal_number(max)) {
                if lo > hi {
                    return Err(syn::Error::new_spanned(min, "range `min` exceeds `max`"));
                }
                if let Some(start) = literal_number(init) {
                    if start < lo || start > hi {
                        return Err(syn::Error::new_spanned(
                            init,
                            "range `init` lies outside `min..=max`",
                        ));
                    }
                }
            }
            Ok(())
        }
        RangeAttr::Discrete { values, init } => {
            if values.is_empty() {
                return Err(syn::Error::new(
                    proc_macro2::Span::call_site(),
                    "`values(..)` must list at least one value",
                ));
            }
            if let Some(init) = init {
                match literal_number(init) {
                    Some(index) if index >= 0.0 && (index as usize) < values.len() => {}
                    Some(_) => {
                        return Err(syn::Error::new_spanned(
                            init,
                            "`init` must index into `values(..)`",
                        ))
                    }
                    None => {
                        return Err(syn::Error::new_spanned(
                            init,
                            "`init` must be an integer literal",
                        ))
                    }
                }
            }
            for value in values {
                discrete_value(value)?;
            }
            Ok(())
        }
    }
}

fn discrete_value(expr: &Expr) -> syn::Result<TokenStream> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(quote!(::portvalue_core::Value::String(::std::string::String::from(#s)))),
            Lit::Int(i) => Ok(quote!(::portvalue_core::Value::Int((#i) as i32))),
            Lit::Float(f) => Ok(quote!(::portvalue_core::Value::Float((#f) as f32))),
            Lit::Bool(b) => Ok(quote!(::portvalue_core::Value::Bool(#b))),
            _ => Err(syn::Error::new_spanned(
                expr,
                "discrete values must be string, integer, float or bool literals",
            )),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_), ..
        }) => match literal_number(expr) {
            Some(_) if is_float_literal(expr) => {
                Ok(quote!(::portvalue_core::Value::Float((#expr) as f32)))
            }
            Some(_) => Ok(quote!(::portvalue_core::Value::Int((#expr) as i32))),
            None => Err(syn::Error::new_spanned(expr, "expected a numeric literal")),
        },
        _ => Err(syn::Error::new_spanned(
            expr,
            "discrete values must be string, integer, float or bool literals",
        )),
    }
}

fn is_float_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Float(_), ..
        }) => true,
        Expr::Unary(unary) => is_float_literal(&unary.expr),
        _ => false,
    }
}

fn range_tokens(range: &RangeAttr) -> TokenStream {
    match range {
        RangeAttr::Continuous { min, max, init } => quote! {
            ::portvalue_core::Range::Continuous {
                min: (#min) as f64,
                max: (#max) as f64,
                init: (#init) as f64,
            }
        },
        RangeAttr::Discrete { values, init } => {
            // Already validated by `check_range`.
            let values = values
                .iter()
                .filter_map(|value| discrete_value(value).ok());
            let init = match init {
                Some(init) => quote!((#init) as usize),
                None => quote!(0usize),
            };
            quote! {
                ::portvalue_core::Range::Discrete {
                    values: ::std::vec![#(#values),*],
                    init: #init,
                }
            }
        }
    }
}
