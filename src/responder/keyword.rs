//! Stateless keyword routing

use super::{InboundMessage, Reply, Responder};
use crate::completion::Completion;
use crate::intake::{normalize, NormalizedInput};
use async_trait::async_trait;

const ACK_PHRASES: &[&str] = &[
    "thanks",
    "thank you",
    "thx",
    "obrigado",
    "obrigada",
    "valeu",
    "gracias",
    "ok",
];

const QUOTE_WORDS: &[&str] = &["price", "quote", "orçamento", "preço", "precio", "cotización"];

const SCHEDULE_WORDS: &[&str] = &["schedule", "window", "horário", "horario", "agenda"];

const GREETING_TOKENS: &[&str] = &["hi", "hello", "oi", "olá", "hola"];

const QUOTE_TEXT: &str = "Para o orçamento preciso de: ZIP, nº de quartos, nº de banheiros \
e tipo de limpeza (Standard/Deep/Move-Out).";

const SCHEDULE_TEXT: &str = "Temos janelas 8–10, 10–12 ou 13–15. Qual prefere?";

const GREETING_TEXT: &str = "Olá! Sou o assistente da Casa/Mega Cleaning. \
Quer um orçamento ou agendar uma limpeza?";

/// Where a message is routed, first match wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Acknowledge,
    Quote,
    Schedule,
    Greeting,
    Open,
}

pub fn route(input: &NormalizedInput) -> Route {
    let text = input.text.as_str();

    if ACK_PHRASES.contains(&text) {
        Route::Acknowledge
    } else if QUOTE_WORDS.iter().any(|word| text.contains(word)) {
        Route::Quote
    } else if SCHEDULE_WORDS.iter().any(|word| text.contains(word)) {
        Route::Schedule
    } else if input.tokens().any(|token| GREETING_TOKENS.contains(&token)) {
        Route::Greeting
    } else {
        Route::Open
    }
}

pub struct KeywordResponder {
    completion: Completion,
}

impl KeywordResponder {
    pub fn new(completion: Completion) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    async fn respond(&self, inbound: &InboundMessage) -> Reply {
        let route = route(&normalize(&inbound.body));
        tracing::info!(caller = %inbound.from, ?route, "Keyword route");

        match route {
            Route::Acknowledge => Reply::Silent,
            Route::Quote => Reply::Message(QUOTE_TEXT.to_string()),
            Route::Schedule => Reply::Message(SCHEDULE_TEXT.to_string()),
            Route::Greeting => Reply::Message(GREETING_TEXT.to_string()),
            Route::Open => Reply::Message(self.completion.reply(&inbound.body).await),
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
