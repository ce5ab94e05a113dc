//! `#[derive(Bean)]` 实现

use crate::utils::{extract_generic_type, is_option_type, is_type_named, to_camel_case};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    punctuated::Punctuated, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Path, Result,
    Token, Type,
};

/// 结构体级别的 `#[bean(...)]` 参数
#[derive(Default)]
struct BeanArgs {
    /// 类型名称，缺省为结构体名
    class: Option<String>,
    /// 自定义构造函数，缺省使用 `Default`
    constructor: Option<Path>,
    /// 初始化回调方法，按声明顺序执行
    post_constructs: Vec<Ident>,
    /// 可赋值的 trait 对象类型
    provides: Vec<Type>,
    factory_post_processor: bool,
    bean_post_processor: bool,
}

impl BeanArgs {
    fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut args = BeanArgs::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("bean")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("class") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(meta.error("类型名称不能为空"));
                    }
                    args.class = Some(lit.value());
                } else if meta.path.is_ident("constructor") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.constructor = Some(lit.parse()?);
                } else if meta.path.is_ident("post_construct") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.post_constructs.push(lit.parse()?);
                } else if meta.path.is_ident("provides") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.provides.extend(types);
                } else if meta.path.is_ident("factory_post_processor") {
                    args.factory_post_processor = true;
                } else if meta.path.is_ident("bean_post_processor") {
                    args.bean_post_processor = true;
                } else {
                    return Err(meta.error("未知的 bean 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 字段注入方式
enum Injection {
    Value,
    Reference,
}

/// 字段级别的 `#[bean(...)]` 参数
struct PropertyField<'a> {
    field: &'a Field,
    ident: &'a Ident,
    property: String,
    injection: Injection,
}

impl<'a> PropertyField<'a> {
    fn from_field(field: &'a Field) -> Result<Option<Self>> {
        let Some(ident) = field.ident.as_ref() else {
            return Ok(None);
        };

        let mut injection = None;
        let mut property = None;
        let mut annotated = false;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("bean")) {
            annotated = true;
            attr.parse_nested_meta(|meta| {
                let kind = if meta.path.is_ident("value") {
                    Injection::Value
                } else if meta.path.is_ident("reference") {
                    Injection::Reference
                } else if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    property = Some(lit.value());
                    return Ok(());
                } else {
                    return Err(meta.error("未知的字段参数，可用: value, reference, name"));
                };
                if injection.replace(kind).is_some() {
                    return Err(meta.error("value 和 reference 只能指定一个"));
                }
                Ok(())
            })?;
        }

        if !annotated {
            return Ok(None);
        }
        let Some(injection) = injection else {
            return Err(Error::new_spanned(field, "需要指定 value 或 reference"));
        };

        Ok(Some(Self {
            field,
            ident,
            property: property.unwrap_or_else(|| to_camel_case(&ident.to_string())),
            injection,
        }))
    }

    fn expand(&self, bean: &Ident) -> Result<TokenStream> {
        let ident = self.ident;
        let property = &self.property;
        let ty = &self.field.ty;

        match self.injection {
            Injection::Value => Ok(quote! {
                .value::<#ty, _>(#property, |bean: &mut #bean, value: #ty| {
                    bean.#ident = value;
                })
            }),
            Injection::Reference => {
                let optional = is_option_type(ty);
                let shared = if optional {
                    extract_generic_type(ty)
                } else {
                    Some(ty)
                };
                let target = shared
                    .filter(|shared| is_type_named(shared, "Shared"))
                    .and_then(extract_generic_type)
                    .ok_or_else(|| {
                        Error::new_spanned(ty, "引用字段的类型必须是 Shared<T> 或 Option<Shared<T>>")
                    })?;
                let assign = if optional {
                    quote! { bean.#ident = ::std::option::Option::Some(value); }
                } else {
                    quote! { bean.#ident = value; }
                };
                Ok(quote! {
                    .reference::<#target, _>(
                        #property,
                        |bean: &mut #bean, value: ::di_abstractions::Shared<#target>| {
                            #assign
                        },
                    )
                })
            }
        }
    }
}

/// 展开 `#[derive(Bean)]`
pub fn derive_bean_impl(input: DeriveInput) -> Result<TokenStream> {
    let bean = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "Bean 不支持泛型结构体"));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(bean, "Bean 只支持具名字段的结构体"));
            }
        },
        _ => return Err(Error::new_spanned(bean, "Bean 只能用于结构体")),
    };

    let args = BeanArgs::from_attrs(&input)?;
    let class = args.class.clone().unwrap_or_else(|| bean.to_string());

    let builder = match &args.constructor {
        Some(constructor) => quote! {
            ::di_abstractions::BeanType::builder_with::<#bean, _>(#class, #constructor)
        },
        None => quote! {
            ::di_abstractions::BeanType::builder::<#bean>(#class)
        },
    };

    let mut properties = Vec::new();
    for field in &fields {
        if let Some(property) = PropertyField::from_field(field)? {
            properties.push(property.expand(bean)?);
        }
    }

    let post_constructs = args.post_constructs.iter().map(|method| {
        let name = method.to_string();
        quote! {
            .post_construct(#name, |bean: &mut #bean| #bean::#method(bean))
        }
    });

    let casts = args.provides.iter().map(|target| {
        quote! {
            .assignable_to::<#target, _>(|bean: ::di_abstractions::Shared<#bean>| {
                bean as ::di_abstractions::Shared<#target>
            })
        }
    });

    let factory_post_processor = args
        .factory_post_processor
        .then(|| quote! { .factory_post_processor() });
    let bean_post_processor = args
        .bean_post_processor
        .then(|| quote! { .bean_post_processor() });

    Ok(quote! {
        impl ::di_abstractions::BeanClass for #bean {
            fn bean_type() -> ::di_abstractions::BeanType {
                #builder
                    #(#properties)*
                    #(#post_constructs)*
                    #(#casts)*
                    #factory_post_processor
                    #bean_post_processor
                    .build()
            }
        }
    })
}
