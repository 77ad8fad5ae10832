// Built-in analysis prompt. Used when neither CUSTOM_PROMPT nor a stored active record exists.

use chrono::{DateTime, Utc};

use crate::prompts::models::{PromptTemplate, DEFAULT_PROMPT_ID};

pub const DEFAULT_PROMPT_NAME: &str = "기본 분석 프롬프트";
pub const DEFAULT_PROMPT_DESCRIPTION: &str = "고객 리뷰 감성 분석을 위한 기본 프롬프트";

/// Placeholders: {customerReview}, {productServiceGroup}, {productServiceName}.
pub const DEFAULT_PROMPT_CONTENT: &str = r#"###지시사항
제공된 고객 리뷰를 정확히 분석하여 감성 분류(긍정·부정)를 수행하고, 각 집합에서 키워드·빈도·샘플 리뷰·개선 인사이트를 도출하시오.
모든 리뷰를 빠짐없이 분석하고 정확한 개수를 세어야 합니다.

###핵심 분석 규칙
1. 리뷰 개수 정확성
   - 제공된 모든 리뷰를 하나도 빠짐없이 개별적으로 카운트
   - 모든 리뷰는 긍정 또는 부정 중 정확히 하나로 분류 (중립 분류 없음)
   - totalReviewCount = positiveReviewCount + negativeReviewCount (반드시 일치)

2. 감성 분류 기준
   긍정 리뷰:
   - 명확한 긍정 표현: 좋다, 만족, 추천, 빠르다, 편리하다, 괜찮다, 무난하다
   - 칭찬 표현: 굿, 대박, 짱, 최고, 완벽, 훌륭
   - 긍정적 결과: 효과있다, 도움된다, 성공적

   부정 리뷰:
   - 명확한 부정 표현: 나쁘다, 불만, 느리다, 불편하다, 별로다
   - 문제점 지적: 깨졌다, 고장, 결함, 오류
   - 부정적 감정: 짜증, 화남, 후회, 실망
   - 양보 표현: "맛은 없지만", "별로지만", "아쉽지만" 등은 부정
   - 조건부 부정: "~만 아니면", "~때문에 별로", "~가 문제"
   - 약한 부정: "그냥 그렇다", "보통이다", "기대에 못미친다"

3. 혼합 감정 처리
   - 한 리뷰에 긍정과 부정이 함께 있으면 버리지 말고 긍정 1개, 부정 1개로 분리하여 카운트
   - 예: "배송은 빠른데 제품이 별로" → 긍정 1개, 부정 1개
   - 주된 감정이 분명하면 해당 감정으로 분류: "맛은 없지만 비타민이니까" → 부정

4. 키워드 추출
   - 감성별로 가장 많이 언급된 명사/형용사 상위 5개 (빈도 내림차순)
   - 빈도는 중복 제거 없이 실제 언급 횟수 그대로 계산
   - 키워드마다 원문 그대로의 샘플 리뷰를 최대 3개 포함

###분석 절차
1. 전체 리뷰 개수를 센다
2. 각 리뷰를 긍정/부정으로 분류한다
3. 분류 결과의 합이 전체와 일치하는지 검증한다
4. 키워드를 추출하고 빈도를 계산한다
5. 인사이트(개선 아이디어, 마케팅 전략, 홍보 카피)를 작성한다

###출력 형태
아래 구조와 정확히 일치하는 JSON 객체 하나만 응답하시오. JSON 외의 설명, 마크다운, 코드 블록은 포함하지 마시오.
{
  "product": "{productServiceName}",
  "analysisDate": "YYYY-MM-DD",
  "totalReviewCount": 0,
  "positiveReviewCount": 0,
  "negativeReviewCount": 0,
  "positiveKeywords": [
    { "keyword": "키워드", "frequency": 0, "sampleReviews": ["샘플1", "샘플2", "샘플3"] }
  ],
  "negativeKeywords": [
    { "keyword": "키워드", "frequency": 0, "sampleReviews": ["샘플1", "샘플2", "샘플3"] }
  ],
  "insights": {
    "improvementIdeas": ["개선아이디어1", "개선아이디어2", "개선아이디어3"],
    "marketingStrategy": "문단을 빈 줄로 구분한 400자 이상의 마케팅 전략",
    "promoCopies": ["홍보카피1", "홍보카피2", "홍보카피3"]
  }
}

###분석할 고객 리뷰
{customerReview}

###제품 정보
제품/서비스 군: {productServiceGroup}
제품/서비스 이름: {productServiceName}"#;

/// Builds the built-in template stamped with `now`.
pub fn default_template(now: DateTime<Utc>) -> PromptTemplate {
    PromptTemplate {
        id: DEFAULT_PROMPT_ID.to_string(),
        name: DEFAULT_PROMPT_NAME.to_string(),
        description: DEFAULT_PROMPT_DESCRIPTION.to_string(),
        content: DEFAULT_PROMPT_CONTENT.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
