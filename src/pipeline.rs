//! Compilation pipeline.
//!
//! Runs source text through the lexer, parser, analyzer, optimizer and
//! generator, stopping after the phase selected by [`OutputType`].

use std::{fmt::Display, rc::Rc, str::FromStr, time::Instant};

use tracing::{debug, info_span};

use crate::{
    analyzer::{
        analyzer::analyze,
        graph::{stringify, stringify_ast},
    },
    errors::errors::Error,
    generator::generator::generate,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

/// How far to run the pipeline, and what to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    /// The raw tree straight from the parser
    Ast,
    /// The analyzed program
    Analyzed,
    /// The analyzed program after optimization
    Optimized,
    /// JavaScript for the optimized program
    #[default]
    Js,
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ast" => Ok(OutputType::Ast),
            "analyzed" => Ok(OutputType::Analyzed),
            "optimized" => Ok(OutputType::Optimized),
            "js" => Ok(OutputType::Js),
            _ => Err(format!("Unknown output type `{}`, expected one of ast, analyzed, optimized, js", s)),
        }
    }
}

impl Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::Ast => write!(f, "ast"),
            OutputType::Analyzed => write!(f, "analyzed"),
            OutputType::Optimized => write!(f, "optimized"),
            OutputType::Js => write!(f, "js"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    pub output: OutputType,
    /// Name reported in error positions
    pub file_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            output: OutputType::default(),
            file_name: String::from("shell"),
        }
    }
}

/// Compiles `source`, returning the requested output or the first error.
pub fn compile(source: &str, options: &CompileOptions) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = {
        let _span = info_span!("tokenize").entered();
        let phase_start = Instant::now();
        let tokens = tokenize(source.to_string(), Some(options.file_name.clone()))?;
        debug!(tokens = tokens.len(), elapsed = ?phase_start.elapsed(), "tokenized");
        tokens
    };

    let ast = {
        let _span = info_span!("parse").entered();
        let phase_start = Instant::now();
        let (_, ast) = parse(tokens, Rc::new(options.file_name.clone()));
        let ast = ast?;
        debug!(statements = ast.body.len(), elapsed = ?phase_start.elapsed(), "parsed");
        ast
    };

    if options.output == OutputType::Ast {
        return Ok(stringify_ast(&ast));
    }

    let analyzed = {
        let _span = info_span!("analyze").entered();
        let phase_start = Instant::now();
        let analyzed = analyze(&ast)?;
        debug!(elapsed = ?phase_start.elapsed(), "analyzed");
        analyzed
    };

    if options.output == OutputType::Analyzed {
        return Ok(stringify(&analyzed));
    }

    let optimized = {
        let _span = info_span!("optimize").entered();
        let phase_start = Instant::now();
        let optimized = optimize(analyzed);
        debug!(elapsed = ?phase_start.elapsed(), "optimized");
        optimized
    };

    if options.output == OutputType::Optimized {
        return Ok(stringify(&optimized));
    }

    let _span = info_span!("generate").entered();
    let js = generate(&optimized);
    debug!(total = ?start.elapsed(), "generated");

    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_type_round_trips_through_strings() {
        for output in [OutputType::Ast, OutputType::Analyzed, OutputType::Optimized, OutputType::Js] {
            assert_eq!(output.to_string().parse::<OutputType>(), Ok(output));
        }
        assert!("llvm".parse::<OutputType>().is_err());
    }

    #[test]
    fn test_default_options_produce_javascript() {
        let js = compile("print 1 + 2;", &CompileOptions::default()).unwrap();
        assert_eq!(js, "console.log(3);");
    }

    #[test]
    fn test_stops_after_requested_phase() {
        let options = CompileOptions { output: OutputType::Analyzed, ..Default::default() };
        let analyzed = compile("print 1 + 2;", &options).unwrap();
        assert_eq!(analyzed, "   1 | Program statements=[#2]\n   2 | PrintStatement argument=#3\n   3 | BinaryExpression op='+' left=1 right=2");

        let options = CompileOptions { output: OutputType::Optimized, ..Default::default() };
        let optimized = compile("print 1 + 2;", &options).unwrap();
        assert_eq!(optimized, "   1 | Program statements=[#2]\n   2 | PrintStatement argument=3");
    }

    #[test]
    fn test_errors_carry_the_file_name() {
        let options = CompileOptions { output: OutputType::Js, file_name: String::from("main.bella") };
        let error = compile("print y;", &options).unwrap_err();
        assert_eq!(error.get_position().file.as_str(), "main.bella");
        assert_eq!(error.get_error_name(), "NotDeclared");
    }
}
